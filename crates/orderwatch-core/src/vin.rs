//! Decoding of 17 character vehicle identification numbers.

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VinInfo {
    pub vin: String,
    pub manufacturer: &'static str,
    pub region: &'static str,
    pub model: &'static str,
    pub body_type: &'static str,
    pub fuel_type: &'static str,
    pub powertrain: &'static str,
    pub model_year: &'static str,
    pub plant: &'static str,
    pub serial_number: String,
}

fn world_manufacturer(wmi: &str) -> Option<(&'static str, &'static str)> {
    match wmi {
        "5YJ" => Some(("Tesla, Inc.", "Fremont, CA / Austin, TX, USA")),
        "7SA" => Some(("Tesla, Inc.", "Austin, TX, USA")),
        "7G2" => Some(("Tesla, Inc.", "Reno, NV, USA")),
        "LRW" => Some(("Tesla, Inc.", "Shanghai, China")),
        "XP7" => Some(("Tesla, Inc.", "Berlin, Germany")),
        _ => None,
    }
}

fn model(code: u8) -> Option<&'static str> {
    match code {
        b'S' => Some("Model S"),
        b'3' => Some("Model 3"),
        b'X' => Some("Model X"),
        b'Y' => Some("Model Y"),
        b'C' => Some("Cybertruck"),
        b'R' => Some("Roadster"),
        b'T' => Some("Semi"),
        _ => None,
    }
}

fn body_type(model: u8, code: u8) -> Option<&'static str> {
    match (model, code) {
        (b'S', b'A') => Some("Hatchback 5-door, LHD"),
        (b'S', b'B') => Some("Hatchback 5-door, RHD"),
        (b'3', b'A') => Some("Sedan 4-door, LHD"),
        (b'3', b'B') => Some("Sedan 4-door, RHD"),
        (b'X', b'A') | (b'Y', b'A' | b'C' | b'E') => Some("SUV 5-door, LHD"),
        (b'X', b'B') | (b'Y', b'B' | b'D' | b'F') => Some("SUV 5-door, RHD"),
        (b'C', b'A') => Some("Pickup, LHD"),
        (b'C', b'B') => Some("Pickup, RHD"),
        _ => None,
    }
}

fn powertrain(model: u8, code: u8) -> Option<&'static str> {
    match (model, code) {
        (b'S', b'1') => Some("Single Motor - Standard"),
        (b'S', b'2' | b'4') => Some("Dual Motor - Standard"),
        (b'S', b'3' | b'5') => Some("Dual Motor - Performance"),
        (b'S', b'6') => Some("Tri Motor"),
        (b'3', b'A' | b'C' | b'G' | b'H' | b'K') => Some("Single Motor - Standard Range Plus, RWD"),
        (b'3', b'B') => Some("Single Motor - Standard Range, RWD"),
        (b'3', b'D') => Some("Single Motor - Mid Range, RWD"),
        (b'3', b'E' | b'L' | b'N' | b'Q') => Some("Dual Motor - Long Range, AWD"),
        (b'3', b'F' | b'P' | b'R') => Some("Dual Motor - Performance, AWD"),
        (b'Y', b'A') => Some("Single Motor - Standard Range, RWD"),
        (b'Y', b'C' | b'D' | b'F' | b'H') => Some("Dual Motor - Long Range, AWD"),
        (b'Y', b'E' | b'G') => Some("Dual Motor - Performance, AWD"),
        (b'Y', b'J' | b'W') => Some("Single Motor - RWD"),
        (b'C', b'D') => Some("Dual Motor - AWD"),
        (b'C', b'E') => Some("Tri Motor - AWD"),
        _ => None,
    }
}

fn model_year(code: u8) -> Option<&'static str> {
    const YEARS: [(u8, &str); 13] = [
        (b'E', "2014"),
        (b'F', "2015"),
        (b'G', "2016"),
        (b'H', "2017"),
        (b'J', "2018"),
        (b'K', "2019"),
        (b'L', "2020"),
        (b'M', "2021"),
        (b'N', "2022"),
        (b'P', "2023"),
        (b'R', "2024"),
        (b'S', "2025"),
        (b'T', "2026"),
    ];
    YEARS.iter().find(|(c, _)| *c == code).map(|(_, y)| *y)
}

fn plant(code: u8) -> Option<&'static str> {
    match code {
        b'F' => Some("Fremont, CA, USA"),
        b'A' => Some("Austin, TX, USA"),
        b'C' => Some("Shanghai, China"),
        b'B' => Some("Berlin, Germany"),
        b'P' => Some("Palo Alto, CA, USA"),
        b'N' => Some("Reno, NV, USA"),
        _ => None,
    }
}

/// Decode a VIN. Returns `None` unless it is exactly 17 ASCII characters
/// after trimming.
pub fn decode_vin(vin: &str) -> Option<VinInfo> {
    let vin = vin.trim().to_ascii_uppercase();
    if vin.len() != 17 || !vin.is_ascii() {
        return None;
    }
    let bytes = vin.as_bytes();
    let (manufacturer, region) = world_manufacturer(&vin[0..3]).unwrap_or((UNKNOWN, UNKNOWN));

    Some(VinInfo {
        manufacturer,
        region,
        model: model(bytes[3]).unwrap_or(UNKNOWN),
        body_type: body_type(bytes[3], bytes[4]).unwrap_or(UNKNOWN),
        fuel_type: if bytes[6] == b'E' { "Electric" } else { UNKNOWN },
        powertrain: powertrain(bytes[3], bytes[7]).unwrap_or(UNKNOWN),
        model_year: model_year(bytes[9]).unwrap_or(UNKNOWN),
        plant: plant(bytes[10]).unwrap_or(UNKNOWN),
        serial_number: vin[11..17].to_string(),
        vin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_berlin_model_y() {
        let info = decode_vin("XP7YACEF9TB123456").unwrap();
        assert_eq!(info.manufacturer, "Tesla, Inc.");
        assert_eq!(info.region, "Berlin, Germany");
        assert_eq!(info.model, "Model Y");
        assert_eq!(info.body_type, "SUV 5-door, LHD");
        assert_eq!(info.fuel_type, "Electric");
        assert_eq!(info.powertrain, "Dual Motor - Long Range, AWD");
        assert_eq!(info.model_year, "2026");
        assert_eq!(info.plant, "Berlin, Germany");
        assert_eq!(info.serial_number, "123456");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let info = decode_vin("  5yj3e1ea1lf123456 ").unwrap();
        assert_eq!(info.vin, "5YJ3E1EA1LF123456");
        assert_eq!(info.model, "Model 3");
        assert_eq!(info.powertrain, "Single Motor - Standard Range Plus, RWD");
        assert_eq!(info.model_year, "2020");
        assert_eq!(info.plant, "Fremont, CA, USA");
    }

    #[test]
    fn unknown_codes_render_unknown() {
        let info = decode_vin("ABC9Z9Z999Z999999").unwrap();
        assert_eq!(info.manufacturer, UNKNOWN);
        assert_eq!(info.model, UNKNOWN);
        assert_eq!(info.body_type, UNKNOWN);
        assert_eq!(info.fuel_type, UNKNOWN);
        assert_eq!(info.model_year, UNKNOWN);
    }

    #[test]
    fn model_x_body_codes_are_limited() {
        assert_eq!(decode_vin("7SAXBCEA1PF123456").unwrap().body_type, "SUV 5-door, RHD");
        assert_eq!(decode_vin("7SAXCCEA1PF123456").unwrap().body_type, UNKNOWN);
        assert_eq!(decode_vin("7SAXFCEA1PF123456").unwrap().body_type, UNKNOWN);
        assert_eq!(decode_vin("7SAYFCEA1PF123456").unwrap().body_type, "SUV 5-door, RHD");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(decode_vin("").is_none());
        assert!(decode_vin("N/A").is_none());
        assert!(decode_vin("5YJ3E1EA1LF12345").is_none());
    }
}
