//! Template rendering for timer reports.
//!
//! Templates use `str.format`-like slots: `{}`, `{0}` or `{:0.4f}` for the
//! elapsed seconds, and named slots `{name}`, `{milliseconds}`, `{seconds}`,
//! `{minutes}`, `{level}` and `{fps}`, each accepting an optional
//! `:[align][0][width][.precision][e|f|g|s]` spec. `{{` and `}}` are literal
//! braces. Unknown slots are kept as written.
//!
//! Numbers print like Python floats: `90.0`, `7.59e-07`, `1e+25`. A precision
//! without a type letter counts significant digits (`{:.3}` of `123.0` is
//! `1.23e+02`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Lower bound for the elapsed time when computing frames per second
pub const FPS_FLOOR: f64 = 1e-25;

static SLOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{(0|[A-Za-z_]*)(?::([^{}]*))?\}").expect("invalid slot pattern")
});

static SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([<>^])?(0)?(\d+)?(?:\.(\d+))?([efgs]?)$").expect("invalid spec pattern")
});

/// Values available to a template for one measurement
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    pub name: Option<&'a str>,
    pub seconds: f64,
    pub level: &'a str,
    pub show_fps: bool,
}

enum Value {
    Number(f64),
    Text(String),
}

impl Fields<'_> {
    fn lookup(&self, key: &str) -> Option<Value> {
        let value = match key {
            "" | "0" | "seconds" => Value::Number(self.seconds),
            "milliseconds" => Value::Number(self.seconds * 1000.0),
            "minutes" => Value::Number(self.seconds / 60.0),
            "name" => Value::Text(self.name.unwrap_or("None").to_string()),
            "level" => Value::Text(self.level.to_string()),
            "fps" => Value::Text(fps(self.seconds, self.show_fps)),
            _ => return None,
        };

        Some(value)
    }
}

pub(crate) fn fps(seconds: f64, show_fps: bool) -> String {
    if show_fps {
        format!("{} fps", repr(1.0 / seconds.max(FPS_FLOOR)))
    } else {
        String::new()
    }
}

pub(crate) fn render(template: &str, fields: &Fields<'_>) -> String {
    SLOT.replace_all(template, |caps: &Captures<'_>| {
        let slot = &caps[0];
        match slot {
            "{{" => return "{".to_string(),
            "}}" => return "}".to_string(),
            _ => (),
        }

        let key = caps.get(1).map_or("", |m| m.as_str());
        let spec = caps.get(2).map_or("", |m| m.as_str());

        fields
            .lookup(key)
            .and_then(|value| apply_spec(&value, spec))
            .unwrap_or_else(|| slot.to_string())
    })
    .into_owned()
}

// None when the spec is not understood
fn apply_spec(value: &Value, spec: &str) -> Option<String> {
    let caps = SPEC.captures(spec)?;

    let align = caps.get(1).map(|m| m.as_str());
    let zero = caps.get(2).is_some();
    let width: usize = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let precision: Option<usize> = match caps.get(4) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    let kind = caps.get(5).map_or("", |m| m.as_str());

    match value {
        Value::Number(number) => {
            let rendered = match kind {
                "f" => fixed(*number, precision.unwrap_or(6)),
                "e" => scientific(*number, precision.unwrap_or(6)),
                "g" => general(*number, precision.unwrap_or(6), false),
                "" => match precision {
                    Some(p) => general(*number, p, true),
                    None => repr(*number),
                },
                _ => return None,
            };

            if zero && align.is_none() {
                Some(zero_pad(&rendered, width))
            } else {
                Some(pad(&rendered, width, align.unwrap_or(">")))
            }
        }
        Value::Text(text) => {
            if !matches!(kind, "" | "s") {
                return None;
            }

            let rendered: String = match precision {
                Some(p) => text.chars().take(p).collect(),
                None => text.clone(),
            };

            Some(pad(&rendered, width, align.unwrap_or("<")))
        }
    }
}

fn pad(text: &str, width: usize, align: &str) -> String {
    match align {
        ">" => format!("{text:>width$}"),
        "^" => format!("{text:^width$}"),
        _ => format!("{text:<width$}"),
    }
}

// zeros go after the sign
fn zero_pad(text: &str, width: usize) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let fill = width.saturating_sub(text.chars().count());

    format!("{sign}{}{digits}", "0".repeat(fill))
}

fn non_finite(number: f64) -> Option<String> {
    if number.is_nan() {
        Some("nan".to_string())
    } else if number.is_infinite() {
        Some(if number > 0.0 { "inf" } else { "-inf" }.to_string())
    } else {
        None
    }
}

// "7.59e-7" -> ("7.59", -7)
fn split_exponent(text: &str) -> (&str, i32) {
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exponent.abs())
}

fn strip_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// `str(float)`: shortest round-trip digits, scientific outside `1e-4..1e16`
pub(crate) fn repr(number: f64) -> String {
    if let Some(text) = non_finite(number) {
        return text;
    }

    let shortest = format!("{number:e}");
    let (mantissa, exponent) = split_exponent(&shortest);

    if (-4..16).contains(&exponent) {
        let text = format!("{number}");
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    } else {
        format!("{mantissa}{}", exponent_suffix(exponent))
    }
}

fn fixed(number: f64, precision: usize) -> String {
    non_finite(number).unwrap_or_else(|| format!("{number:.precision$}"))
}

fn scientific(number: f64, precision: usize) -> String {
    if let Some(text) = non_finite(number) {
        return text;
    }

    let text = format!("{number:.precision$e}");
    let (mantissa, exponent) = split_exponent(&text);

    format!("{mantissa}{}", exponent_suffix(exponent))
}

// `g` when `keep_point` is false; the untyped `.N` form otherwise, which keeps
// one decimal in fixed notation and switches to scientific one digit earlier
fn general(number: f64, precision: usize, keep_point: bool) -> String {
    if let Some(text) = non_finite(number) {
        return text;
    }

    let precision = precision.max(1);
    let rounded = format!("{:.*e}", precision - 1, number);
    let (mantissa, exponent) = split_exponent(&rounded);

    let digits = precision as i32;
    let upper = if keep_point { digits - 1 } else { digits };

    if (-4..upper).contains(&exponent) {
        let decimals = (digits - 1 - exponent).max(0) as usize;
        let text = format!("{number:.decimals$}");
        let text = strip_zeros(&text);

        if keep_point && !text.contains('.') {
            format!("{text}.0")
        } else {
            text.to_string()
        }
    } else {
        format!("{}{}", strip_zeros(mantissa), exponent_suffix(exponent))
    }
}
