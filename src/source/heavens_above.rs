//! Live pass predictions from heavens-above.com.
//!
//! The pass summary page lists the visible passes of the next ten days as a
//! table, one `<tr class="clickableRow">` per pass:
//!
//! ```text
//! cell   0       1     2        3    4    5        6    7    8        9    10
//!        date    mag   start    alt  az   high     alt  az   end      alt  az
//!        18 Oct  -3.2  19:30:12 10°  SSW  19:33:40 67°  SE   19:37:02 12°  ENE
//! ```
//!
//! Times are requested in UTC (`tz=UCT`). The date carries no year, and the
//! three times of a pass may straddle midnight, so both are reconstructed
//! relative to the current date.

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};

use super::PassSource;
use crate::clock::Clock;
use crate::compass::angle_of;
use crate::error::SourceError;
use crate::location::Location;
use crate::pass::{Pass, Sample};

/// Pass summary endpoint.
pub const PASS_SUMMARY_URL: &str = "https://www.heavens-above.com/PassSummary.aspx";

/// The site serves the pass table to desktop browsers only.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rows dated further back than this belong to next year.
const YEAR_ROLLOVER_DAYS: i64 = 180;

/// Cells per pass row.
const ROW_CELLS: usize = 11;

/// Scraping client for the heavens-above pass summary.
pub struct HeavensAbove<C: Clock> {
    agent: ureq::Agent,
    location: Location,
    clock: C,
}

impl<C: Clock> HeavensAbove<C> {
    pub fn new(location: Location, clock: C) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).user_agent(USER_AGENT).build();
        Self { agent, location, clock }
    }

    fn fetch(&self) -> Result<String, SourceError> {
        let loc = &self.location;
        log::debug!("requesting passes of {} over {} ({}, {})", loc.satid, loc.name, loc.lat, loc.lng);
        let response = self
            .agent
            .get(PASS_SUMMARY_URL)
            .query("satid", &loc.satid.to_string())
            .query("lat", &loc.lat.to_string())
            .query("lng", &loc.lng.to_string())
            .query("loc", &loc.name)
            .query("alt", &loc.alt.to_string())
            .query("tz", "UCT")
            .call()
            .map_err(Box::new)?;
        Ok(response.into_string()?)
    }
}

impl<C: Clock> PassSource for HeavensAbove<C> {
    fn name(&self) -> &str {
        "heavens-above"
    }

    fn list_visible_passes(&mut self) -> Result<Vec<Pass>, SourceError> {
        let html = self.fetch()?;
        parse_pass_summary(&html, self.clock.now().date_naive())
    }
}

// =============================================================================
// Page Parsing
// =============================================================================

/// Extract the passes from a pass summary page.
///
/// Rows that do not parse are skipped with a warning. Fails only when the
/// page has no pass table at all.
pub fn parse_pass_summary(html: &str, today: NaiveDate) -> Result<Vec<Pass>, SourceError> {
    if !html.contains("standardTable") {
        return Err(SourceError::Parse("no pass table on page".into()));
    }

    let mut passes: Vec<Pass> = rows(html)
        .filter_map(|row| {
            let cells = cells(row);
            match parse_row(&cells, today) {
                Ok(pass) => Some(pass),
                Err(e) => {
                    log::warn!("skipping pass row {cells:?}: {e}");
                    None
                }
            }
        })
        .collect();

    passes.sort_by_key(|p| p.start.time);
    Ok(passes)
}

/// Bodies of the pass rows.
fn rows(html: &str) -> impl Iterator<Item = &str> {
    html.split("<tr").skip(1).filter_map(|chunk| {
        let (tag, body) = chunk.split_once('>')?;
        if !tag.contains("clickableRow") {
            return None;
        }
        Some(body.split_once("</tr>").map_or(body, |(row, _)| row))
    })
}

/// Text content of every cell in a row.
fn cells(row: &str) -> Vec<String> {
    row.split("<td")
        .skip(1)
        .map(|chunk| {
            let content = chunk.split_once('>').map_or("", |(_, c)| c);
            let content = content.split_once("</td>").map_or(content, |(c, _)| c);
            text_of(content)
        })
        .collect()
}

/// Strip nested tags and decode the few entities the page uses.
fn text_of(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&#176;", "°")
        .replace("&deg;", "°")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_owned()
}

fn parse_row(cells: &[String], today: NaiveDate) -> Result<Pass, SourceError> {
    if cells.len() < ROW_CELLS {
        return Err(SourceError::Parse(format!("expected {ROW_CELLS} cells, found {}", cells.len())));
    }

    let date = parse_date(&cells[0], today)?;
    let magnitude = cells[1].parse::<f64>().ok();

    let start = parse_sample(&cells[2..5], date, None)?;
    let high = parse_sample(&cells[5..8], date, Some(start.time))?;
    let end = parse_sample(&cells[8..11], date, Some(high.time))?;

    let pass = Pass::new(start, high, end).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(match magnitude {
        Some(m) => pass.with_magnitude(m),
        None => pass,
    })
}

/// `18 Oct` in the current year, or the next one if that is long past.
fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate, SourceError> {
    let with_year = format!("{text} {}", today.year());
    let date = NaiveDate::parse_from_str(&with_year, "%d %b %Y")
        .map_err(|e| SourceError::Parse(format!("bad date `{text}`: {e}")))?;

    if today - date > TimeDelta::days(YEAR_ROLLOVER_DAYS) {
        return date
            .with_year(today.year() + 1)
            .ok_or_else(|| SourceError::Parse(format!("no {text} next year")));
    }
    Ok(date)
}

/// One `time, altitude, azimuth` cell triple.
///
/// A time earlier than `after` belongs to the following day.
fn parse_sample(cells: &[String], date: NaiveDate, after: Option<DateTime<Utc>>) -> Result<Sample, SourceError> {
    let time = NaiveTime::parse_from_str(&cells[0], "%H:%M:%S")
        .map_err(|e| SourceError::Parse(format!("bad time `{}`: {e}", cells[0])))?;
    let mut at = date.and_time(time).and_utc();
    if after.is_some_and(|prev| at < prev) {
        at += TimeDelta::days(1);
    }

    let altitude = cells[1]
        .trim_end_matches('°')
        .trim()
        .parse::<f64>()
        .map_err(|e| SourceError::Parse(format!("bad altitude `{}`: {e}", cells[1])))?;
    let azimuth = angle_of(&cells[2])?;

    Ok(Sample::new(at, altitude, azimuth))
}
