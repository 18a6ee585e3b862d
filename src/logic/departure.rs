use super::timeline::{sample, DEFAULT_HORIZON_HOURS};
use crate::models::{
    DepartureAnalysis, DepartureWindow, FlightCategory, ForecastPeriod, ForecastPoint, Limitation,
    PersonalMinimums, WindowSample,
};
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Sampling step for window extraction.
pub const SAMPLE_STEP_MIN: i64 = 30;
/// A window at least this long, open now, counts as covering the horizon.
const FULL_HORIZON_MIN: i64 = 330;

/// First base or FM period whose conditions meet the minimums.
pub fn first_qualifying_period(
    periods: &[ForecastPeriod],
    minimums: &PersonalMinimums,
) -> Option<DepartureWindow> {
    periods
        .iter()
        .filter(|p| p.change.is_sustained())
        .find(|p| check_point(&ForecastPoint::from_period(p.from, p), minimums).is_none())
        .map(|p| DepartureWindow {
            start: p.from,
            end: p.to,
            flight_category: p.flight_category(),
            reason: None,
        })
}

/// First personal minimum the point breaks, with a readable reason.
pub fn check_point(
    point: &ForecastPoint,
    minimums: &PersonalMinimums,
) -> Option<(Limitation, String)> {
    if let Some(ceiling) = point.ceiling_ft {
        if ceiling < minimums.ceiling_ft {
            return Some((
                Limitation::Ceiling,
                format!("Ceiling {} ft below {} ft minimum", ceiling, minimums.ceiling_ft),
            ));
        }
    }

    if point.visibility_sm < minimums.visibility_sm {
        return Some((
            Limitation::Visibility,
            format!(
                "Visibility {} SM below {} SM minimum",
                point.visibility_sm, minimums.visibility_sm
            ),
        ));
    }

    if point.wind.speed_kt > minimums.max_wind_kt {
        return Some((
            Limitation::Wind,
            format!("Wind {} kt exceeds {} kt limit", point.wind.speed_kt, minimums.max_wind_kt),
        ));
    }

    if let Some(gust) = point.wind.gust_kt {
        if gust > minimums.max_gust_kt {
            return Some((
                Limitation::Gust,
                format!("Gusts {} kt exceed {} kt limit", gust, minimums.max_gust_kt),
            ));
        }
    }

    None
}

/// Scan the next six hours in half-hour steps for stretches that meet the
/// minimums, and describe them.
pub fn analyze_departure(
    periods: &[ForecastPeriod],
    minimums: &PersonalMinimums,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> DepartureAnalysis {
    let steps = (DEFAULT_HORIZON_HOURS as i64 * 60 / SAMPLE_STEP_MIN) as usize;
    let step = Duration::minutes(SAMPLE_STEP_MIN);
    let samples: Vec<WindowSample> = sample(periods, now, step, steps)
        .iter()
        .map(|point| WindowSample {
            time: point.time,
            flight_category: point.flight_category,
            failure: check_point(point, minimums),
        })
        .collect();

    let windows = extract_windows(&samples);
    let best = longest(&windows).cloned();
    let advisory = advisory(&samples, &windows, offset);

    tracing::debug!(
        samples = samples.len(),
        windows = windows.len(),
        "departure windows extracted"
    );

    DepartureAnalysis {
        samples,
        windows,
        best,
        advisory,
    }
}

/// Merge consecutive passing samples into windows.
///
/// A window closes at the first failing sample after it, or at the last
/// sample when it is still open.
pub fn extract_windows(samples: &[WindowSample]) -> Vec<DepartureWindow> {
    let mut windows = Vec::new();
    let mut open: Option<usize> = None;

    for (i, s) in samples.iter().enumerate() {
        match (s.passes(), open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                windows.push(build_window(&samples[start..i], s.time, s.reason()));
                open = None;
            }
            _ => {}
        }
    }

    if let (Some(start), Some(last)) = (open, samples.last()) {
        windows.push(build_window(&samples[start..], last.time, None));
    }

    windows
}

fn build_window(
    passing: &[WindowSample],
    end: DateTime<Utc>,
    reason: Option<&str>,
) -> DepartureWindow {
    DepartureWindow {
        start: passing[0].time,
        end,
        flight_category: dominant_category(passing),
        reason: reason.map(str::to_string),
    }
}

fn dominant_category(samples: &[WindowSample]) -> FlightCategory {
    most_common(samples.iter().map(|s| s.flight_category)).unwrap_or(FlightCategory::Vfr)
}

/// Most frequent item; the earliest seen wins ties.
fn most_common<T: PartialEq + Copy>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(k, _)| *k == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(T, usize)>, (k, n)| match best {
            Some((_, bn)) if bn >= n => best,
            _ => Some((k, n)),
        })
        .map(|(k, _)| k)
}

fn longest(windows: &[DepartureWindow]) -> Option<&DepartureWindow> {
    windows.iter().fold(None, |best: Option<&DepartureWindow>, w| match best {
        Some(b) if b.duration() >= w.duration() => Some(b),
        _ => Some(w),
    })
}

fn advisory(samples: &[WindowSample], windows: &[DepartureWindow], offset: FixedOffset) -> String {
    let Some(first) = samples.first() else {
        return "Insufficient forecast data to evaluate departure windows.".to_string();
    };

    if windows.is_empty() {
        let limitation =
            most_common(samples.iter().filter_map(|s| s.failure.as_ref().map(|f| f.0)));
        return match limitation {
            Some(l) => format!(
                "No departure window in the next {} hours. Most common limitation: {}.",
                DEFAULT_HORIZON_HOURS, l
            ),
            None => format!("No departure window in the next {} hours.", DEFAULT_HORIZON_HOURS),
        };
    }

    let local = |t: DateTime<Utc>| t.with_timezone(&offset).format("%H:%M").to_string();

    if first.passes() {
        if let [only] = windows {
            if only.duration() >= Duration::minutes(FULL_HORIZON_MIN) {
                return format!(
                    "Conditions within your minimums persist for the next {}+ hours.",
                    DEFAULT_HORIZON_HOURS
                );
            }
            let then = only.reason.as_deref().unwrap_or("Forecast coverage ends");
            return format!(
                "Conditions within your minimums until {} ({}). Then: {}.",
                local(only.end),
                format_duration(only.duration()),
                then
            );
        }

        let ranges: Vec<String> = windows
            .iter()
            .map(|w| format!("{}–{}", local(w.start), local(w.end)))
            .collect();
        return format!("Multiple departure windows: {}.", ranges.join(", "));
    }

    let next = &windows[0];
    format!(
        "Currently below your minimums ({}). Window opens in {} at {} until {} ({}).",
        first.reason().unwrap_or("conditions"),
        format_wait(next.start - first.time),
        local(next.start),
        local(next.end),
        format_duration(next.duration())
    )
}

pub fn format_duration(d: Duration) -> String {
    let minutes = d.num_minutes();
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    match (minutes / 60, minutes % 60) {
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

fn format_wait(d: Duration) -> String {
    let minutes = d.num_minutes();
    if minutes < 60 {
        format!("{} min", minutes)
    } else {
        format!("{:.1} hours", minutes as f64 / 60.0)
    }
}
