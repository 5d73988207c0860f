use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Two-character county code → display name.
pub static REGION_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("00", "Sverige"),
        ("01", "Region Stockholm"),
        ("03", "Region Uppsala"),
        ("04", "Region Södermanland"),
        ("05", "Region Östergötland"),
        ("06", "Region Jönköping"),
        ("07", "Region Kronoberg"),
        ("08", "Region Kalmar"),
        ("09", "Region Gotland"),
        ("10", "Region Blekinge"),
        ("12", "Region Skåne"),
        ("13", "Region Halland"),
        ("14", "Region Västra Götaland"),
        ("17", "Region Värmland"),
        ("18", "Region Örebro"),
        ("19", "Region Västmanland"),
        ("20", "Region Dalarna"),
        ("21", "Region Gävleborg"),
        ("22", "Region Västernorrland"),
        ("23", "Region Jämtland"),
        ("24", "Region Västerbotten"),
        ("25", "Region Norrbotten"),
    ])
});

/// Map a raw region code to its name. Unknown values pass through as-is.
pub fn region_name(raw: &str) -> &str {
    REGION_CODES.get(raw).copied().unwrap_or(raw)
}
