//! Perceived lightness of colour swatches.
//!
//! Colour labels on products are either hex codes or CSS names. When a swatch
//! is drawn with a selection checkmark on top, the checkmark must contrast with
//! the swatch: dark on light colours, white on dark ones. Lightness is judged
//! with the YIQ luma formula.

/// YIQ luma at or above which a colour counts as light.
pub const LIGHTNESS_THRESHOLD: u32 = 170;

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xFF, 0xFF, 0xFF]),
    ("red", [0xFF, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("blue", [0x00, 0x00, 0xFF]),
    ("yellow", [0xFF, 0xFF, 0x00]),
    ("cyan", [0x00, 0xFF, 0xFF]),
    ("aqua", [0x00, 0xFF, 0xFF]),
    ("magenta", [0xFF, 0x00, 0xFF]),
    ("fuchsia", [0xFF, 0x00, 0xFF]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("teal", [0x00, 0x80, 0x80]),
    ("navy", [0x00, 0x00, 0x80]),
    ("silver", [0xC0, 0xC0, 0xC0]),
    ("gold", [0xFF, 0xD7, 0x00]),
    ("orange", [0xFF, 0xA5, 0x00]),
    ("pink", [0xFF, 0xC0, 0xCB]),
    ("brown", [0xA5, 0x2A, 0x2A]),
    ("violet", [0xEE, 0x82, 0xEE]),
    ("indigo", [0x4B, 0x00, 0x82]),
    ("lime", [0x00, 0xFF, 0x00]),
    ("beige", [0xF5, 0xF5, 0xDC]),
];

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RGB`, `#RRGGBB`, `rgb(r, g, b)` or a known colour name.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if let Some(hex) = label.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        if label.to_ascii_lowercase().starts_with("rgb") {
            return Self::from_rgb_function(label);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|&(_, [r, g, b])| Self { r, g, b })
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| {
                    let pair: String = [c, c].iter().collect();
                    channel(&pair)
                });
                Some(Self {
                    r: digits.next()??,
                    g: digits.next()??,
                    b: digits.next()??,
                })
            }
            6 => Some(Self {
                r: channel(hex.get(0..2)?)?,
                g: channel(hex.get(2..4)?)?,
                b: channel(hex.get(4..6)?)?,
            }),
            _ => None,
        }
    }

    fn from_rgb_function(label: &str) -> Option<Self> {
        let values: Vec<u8> = label
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u8>().ok())
            .collect::<Option<_>>()?;
        match values.as_slice() {
            [r, g, b] => Some(Self {
                r: *r,
                g: *g,
                b: *b,
            }),
            _ => None,
        }
    }

    /// YIQ luma in `0..=255`.
    #[must_use]
    pub fn yiq(&self) -> u32 {
        (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000
    }
}

/// Whether a colour label reads as light.
///
/// Labels that cannot be parsed count as dark.
#[must_use]
pub fn is_light_color(label: &str) -> bool {
    Rgb::parse(label).is_some_and(|rgb| rgb.yiq() >= LIGHTNESS_THRESHOLD)
}
