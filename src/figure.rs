use std::fmt;

use serde::{Serialize, Serializer};

use crate::country_codes::CountryCode;
use crate::snapshot::DashboardSnapshot;

pub const MAP_TITLE: &str = "Number of World Cup Wins by Country";
pub const LOCATION_MODE: &str = "country names";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Plotly's sequential Viridis, evenly spaced.
const VIRIDIS: [Rgb; 10] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x48, 0x28, 0x78),
    Rgb(0x3e, 0x49, 0x89),
    Rgb(0x31, 0x68, 0x8e),
    Rgb(0x26, 0x82, 0x8e),
    Rgb(0x1f, 0x9e, 0x89),
    Rgb(0x35, 0xb7, 0x79),
    Rgb(0x6e, 0xce, 0x58),
    Rgb(0xb5, 0xde, 0x2b),
    Rgb(0xfd, 0xe7, 0x25),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Viridis,
}

impl ColorScale {
    fn stops(self) -> &'static [Rgb] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
        }
    }

    /// Linear interpolation along the scale; `t` is clamped to `[0, 1]`.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = scaled - lo as f64;
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lo], stops[hi]);
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeoOptions {
    pub show_countries: bool,
    pub show_coastlines: bool,
}

impl GeoOptions {
    /// Whether the terminal world outline is drawn. It carries coastlines only;
    /// `show_countries` has no terminal rendering since there are no border polygons.
    pub fn draws_coastline_outline(&self) -> bool {
        self.show_coastlines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLocation {
    pub country: String,
    pub iso_code: CountryCode,
    pub wins: usize,
    pub color: Rgb,
}

/// Renderable choropleth description: one shaded location per country in the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethFigure {
    pub title: String,
    pub location_mode: &'static str,
    pub color_scale: ColorScale,
    pub cmin: usize,
    pub cmax: usize,
    pub geo: GeoOptions,
    pub locations: Vec<FigureLocation>,
}

impl ChoroplethFigure {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let aggregate = &snapshot.aggregate;
        let mut figure = Self {
            title: MAP_TITLE.to_string(),
            location_mode: LOCATION_MODE,
            color_scale: ColorScale::Viridis,
            cmin: aggregate.min_wins(),
            cmax: aggregate.max_wins(),
            geo: GeoOptions {
                show_countries: true,
                show_coastlines: true,
            },
            locations: Vec::with_capacity(aggregate.len()),
        };
        for entry in aggregate.entries() {
            let color = figure.color_for(entry.wins);
            figure.locations.push(FigureLocation {
                country: entry.country.clone(),
                iso_code: snapshot.codes.lookup(&entry.country),
                wins: entry.wins,
                color,
            });
        }
        figure
    }

    pub fn color_for(&self, wins: usize) -> Rgb {
        if self.cmax <= self.cmin {
            return self.color_scale.sample(0.5);
        }
        let t = (wins as f64 - self.cmin as f64) / (self.cmax - self.cmin) as f64;
        self.color_scale.sample(t)
    }
}

/// Approximate (longitude, latitude) used to place a country's marker on the terminal map.
pub fn centroid(code: CountryCode) -> Option<(f64, f64)> {
    let CountryCode::Known(iso) = code else {
        return None;
    };
    let point = match iso {
        "ARG" => (-64.0, -34.0),
        "BRA" => (-51.9, -10.0),
        "HRV" => (15.5, 45.1),
        "CZE" => (15.5, 49.8),
        "GBR" => (-1.5, 52.5),
        "FRA" => (2.3, 46.6),
        "DEU" => (10.4, 51.2),
        "HUN" => (19.5, 47.2),
        "ITA" => (12.6, 42.8),
        "NLD" => (5.3, 52.1),
        "ESP" => (-3.7, 40.4),
        "SWE" => (16.0, 62.0),
        "URY" => (-56.0, -32.8),
        _ => return None,
    };
    Some(point)
}
