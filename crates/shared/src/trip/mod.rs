use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Traveler,
}

impl Role {
    /// Both roles may edit the itinerary; anyone else is read-only.
    pub fn can_edit_itinerary(&self) -> bool {
        matches!(self, Role::Admin | Role::Traveler)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Six hex digits, without the leading `#`.
    pub color: String,
}

impl Location {
    /// Black or white, whichever reads better on top of `color`.
    pub fn text_color(&self) -> &'static str {
        text_color_for(&self.color)
    }
}

pub fn text_color_for(color: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_color(color) else {
        return "#000000";
    };

    let luminance = 0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b);

    if luminance > 0.179 {
        "#000000"
    } else {
        "#ffffff"
    }
}

pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn channel(value: u8) -> f64 {
    let c = f64::from(value) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
