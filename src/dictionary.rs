//! Static address dictionaries and the bounded edit-distance matcher.
//!
//! The tables are ordered: `find_closest_match` breaks ties by first-seen
//! position, so the iteration order is part of the behavior contract.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// (canonical two-letter abbreviation, lowercase full name), the 50 states
/// plus the District of Columbia.
pub static US_STATES: &[(&str, &str)] = &[
    ("AL", "alabama"),
    ("AK", "alaska"),
    ("AZ", "arizona"),
    ("AR", "arkansas"),
    ("CA", "california"),
    ("CO", "colorado"),
    ("CT", "connecticut"),
    ("DE", "delaware"),
    ("FL", "florida"),
    ("GA", "georgia"),
    ("HI", "hawaii"),
    ("ID", "idaho"),
    ("IL", "illinois"),
    ("IN", "indiana"),
    ("IA", "iowa"),
    ("KS", "kansas"),
    ("KY", "kentucky"),
    ("LA", "louisiana"),
    ("ME", "maine"),
    ("MD", "maryland"),
    ("MA", "massachusetts"),
    ("MI", "michigan"),
    ("MN", "minnesota"),
    ("MS", "mississippi"),
    ("MO", "missouri"),
    ("MT", "montana"),
    ("NE", "nebraska"),
    ("NV", "nevada"),
    ("NH", "new hampshire"),
    ("NJ", "new jersey"),
    ("NM", "new mexico"),
    ("NY", "new york"),
    ("NC", "north carolina"),
    ("ND", "north dakota"),
    ("OH", "ohio"),
    ("OK", "oklahoma"),
    ("OR", "oregon"),
    ("PA", "pennsylvania"),
    ("RI", "rhode island"),
    ("SC", "south carolina"),
    ("SD", "south dakota"),
    ("TN", "tennessee"),
    ("TX", "texas"),
    ("UT", "utah"),
    ("VT", "vermont"),
    ("VA", "virginia"),
    ("WA", "washington"),
    ("WV", "west virginia"),
    ("WI", "wisconsin"),
    ("WY", "wyoming"),
    ("DC", "district of columbia"),
];

/// Lowercase abbreviation -> full state name.
pub static STATES_BY_ABBREV: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    US_STATES
        .iter()
        .map(|(abbrev, full)| (abbrev.to_ascii_lowercase(), *full))
        .collect()
});

/// Full state name -> canonical two-letter abbreviation.
pub static STATE_ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    US_STATES
        .iter()
        .map(|(abbrev, full)| (*full, *abbrev))
        .collect()
});

/// Full state names in table order, the fuzzy-match candidate list.
pub static STATE_NAMES: Lazy<Vec<&'static str>> =
    Lazy::new(|| US_STATES.iter().map(|(_, full)| *full).collect());

pub static COMMON_STREET_TYPES: &[&str] = &[
    "street",
    "avenue",
    "boulevard",
    "road",
    "drive",
    "lane",
    "court",
    "place",
    "way",
    "circle",
    "parkway",
    "terrace",
    "trail",
    "highway",
    "plaza",
    "alley",
    "bridge",
    "expressway",
    "freeway",
    "walk",
    "square",
];

pub static COMMON_CITY_NAMES: &[&str] = &[
    "new york",
    "los angeles",
    "chicago",
    "houston",
    "phoenix",
    "philadelphia",
    "san antonio",
    "san diego",
    "dallas",
    "san jose",
    "austin",
    "jacksonville",
    "fort worth",
    "columbus",
    "charlotte",
    "francisco",
    "indianapolis",
    "seattle",
    "denver",
    "washington",
    "boston",
    "el paso",
    "nashville",
    "detroit",
    "oklahoma",
    "portland",
    "las vegas",
    "memphis",
    "louisville",
    "baltimore",
    "milwaukee",
    "albuquerque",
    "tucson",
    "fresno",
    "mesa",
    "sacramento",
    "atlanta",
    "kansas",
    "colorado springs",
    "omaha",
    "raleigh",
    "miami",
    "long beach",
    "virginia beach",
    "oakland",
    "minneapolis",
    "tulsa",
    "tampa",
    "arlington",
    "new orleans",
];

/// Street-type abbreviation (bare and dotted) -> canonical word.
pub static STREET_ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("st", "street"),
        ("st.", "street"),
        ("ave", "avenue"),
        ("ave.", "avenue"),
        ("av", "avenue"),
        ("blvd", "boulevard"),
        ("blvd.", "boulevard"),
        ("rd", "road"),
        ("rd.", "road"),
        ("dr", "drive"),
        ("dr.", "drive"),
        ("ln", "lane"),
        ("ln.", "lane"),
        ("ct", "court"),
        ("ct.", "court"),
        ("pl", "place"),
        ("pl.", "place"),
        ("pkwy", "parkway"),
        ("pkwy.", "parkway"),
        ("ter", "terrace"),
        ("ter.", "terrace"),
        ("trl", "trail"),
        ("trl.", "trail"),
        ("hwy", "highway"),
        ("hwy.", "highway"),
        ("cir", "circle"),
        ("cir.", "circle"),
        ("sq", "square"),
        ("sq.", "square"),
        ("aly", "alley"),
        ("aly.", "alley"),
        ("expy", "expressway"),
        ("expy.", "expressway"),
        ("fwy", "freeway"),
        ("fwy.", "freeway"),
    ])
});

/// Compass-direction abbreviation (bare and dotted) -> canonical word.
pub static DIRECTION_ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("n", "north"),
        ("n.", "north"),
        ("s", "south"),
        ("s.", "south"),
        ("e", "east"),
        ("e.", "east"),
        ("w", "west"),
        ("w.", "west"),
        ("ne", "northeast"),
        ("ne.", "northeast"),
        ("nw", "northwest"),
        ("nw.", "northwest"),
        ("se", "southeast"),
        ("se.", "southeast"),
        ("sw", "southwest"),
        ("sw.", "southwest"),
    ])
});

/// Nearest dictionary entry by Levenshtein distance, bounded by
/// `max_distance`. Case-insensitive; ties go to the earlier entry.
pub fn find_closest_match<'a>(
    word: &str,
    dictionary: &[&'a str],
    max_distance: usize,
) -> Option<&'a str> {
    let word = word.to_lowercase();
    let mut best_match = None;
    let mut best_distance = max_distance + 1;

    for candidate in dictionary {
        let distance = strsim::levenshtein(&word, &candidate.to_lowercase());
        if distance < best_distance {
            best_distance = distance;
            best_match = Some(*candidate);
        }
    }

    best_match
}

/// True when the trimmed, lowercased input is a known abbreviation or a
/// known full state name.
pub fn is_valid_us_state(state: &str) -> bool {
    let state = state.trim().to_lowercase();
    STATES_BY_ABBREV.contains_key(state.as_str()) || STATE_ABBREVIATIONS.contains_key(state.as_str())
}

/// Resolve any spelling of a US state to its canonical two-letter
/// abbreviation: exact abbreviation first, then exact full name, then the
/// closest full name within edit distance 2.
pub fn normalize_us_state(state: &str) -> Option<&'static str> {
    let state = state.trim().to_lowercase();

    if let Some(full_name) = STATES_BY_ABBREV.get(state.as_str()) {
        return STATE_ABBREVIATIONS.get(full_name).copied();
    }

    if let Some(abbrev) = STATE_ABBREVIATIONS.get(state.as_str()) {
        return Some(abbrev);
    }

    find_closest_match(&state, &STATE_NAMES, 2)
        .and_then(|name| STATE_ABBREVIATIONS.get(name).copied())
}
