// Brazilian licence plate formatting and validation.
// Two shapes are accepted: the old one (ABC1234, shown as ABC-1234) and
// Mercosul (ABC1D23).
use once_cell::sync::Lazy;
use regex::Regex;

pub const PLATE_LEN: usize = 7;

static LEGACY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9]{4}$").expect("legacy plate pattern"));
static MERCOSUL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9][A-Z][0-9]{2}$").expect("mercosul plate pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormat {
    Legacy,
    Mercosul,
}

impl PlateFormat {
    /// Detects the format of a complete plate. Hyphens are ignored.
    pub fn detect(plate: &str) -> Option<PlateFormat> {
        let bare = plate.replace('-', "");
        if bare.len() < PLATE_LEN {
            return None;
        }
        if LEGACY_PATTERN.is_match(&bare) {
            Some(PlateFormat::Legacy)
        } else if MERCOSUL_PATTERN.is_match(&bare) {
            Some(PlateFormat::Mercosul)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Letter,
    Digit,
}

fn fits(slot: Slot, c: char) -> bool {
    match slot {
        Slot::Letter => c.is_ascii_uppercase(),
        Slot::Digit => c.is_ascii_digit(),
    }
}

// Slot expected at `position`. Position 4 (the 5th character) is open:
// whatever lands there fixes the shape.
fn slot_for(position: usize) -> Option<Slot> {
    match position {
        0..=2 => Some(Slot::Letter),
        4 => None,
        _ => Some(Slot::Digit),
    }
}

/// Formats raw keystrokes into a (possibly partial) canonical plate.
///
/// Non-alphanumerics are removed, letters uppercased and the input cut to
/// seven characters. Characters are then placed slot by slot: three letters, a
/// digit, then a letter (Mercosul) or digit (old format), then two digits. A
/// character that does not fit the next slot is dropped, which keeps the
/// function idempotent.
pub fn format_plate(raw: &str) -> String {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(PLATE_LEN)
        .collect();

    let mut accepted: Vec<char> = Vec::with_capacity(PLATE_LEN);
    for c in cleaned {
        let ok = match slot_for(accepted.len()) {
            Some(slot) => fits(slot, c),
            None => true,
        };
        if ok {
            accepted.push(c);
        }
    }
    accepted.into_iter().collect()
}

/// True when the plate (hyphens ignored) is a complete old-format or Mercosul plate.
pub fn validate_plate(plate: &str) -> bool {
    PlateFormat::detect(plate).is_some()
}

/// Plate as shown in tables: complete old-format plates get a hyphen after the
/// third letter, anything else is returned unchanged.
pub fn display_plate(plate: &str) -> String {
    if plate.contains('-') {
        return plate.to_string();
    }
    if plate.len() == PLATE_LEN && LEGACY_PATTERN.is_match(plate) {
        return format!("{}-{}", &plate[..3], &plate[3..]);
    }
    plate.to_string()
}
