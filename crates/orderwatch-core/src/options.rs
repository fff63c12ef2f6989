//! Marketing option codes (`mktOptions`) and their descriptions.

const OPTION_CODES: &[(&str, &str)] = &[
    // Autopilot
    ("APBS", "Autopilot - Basic"),
    ("APF0", "Autopilot - Basic (different iteration)"),
    ("APF1", "Autopilot - Enhanced"),
    ("APF2", "Full Self-Driving Capability"),
    ("APH3", "Autopilot 3.0 Hardware (HW3)"),
    ("APH4", "Autopilot 4.0 Hardware (HW4)"),
    ("APPA", "Autopilot Active Safety Features"),
    ("APPB", "Enhanced Autopilot"),
    ("APPF", "Full Self-Driving Capability"),
    // Paint
    ("PBSB", "Solid Black"),
    ("PMNG", "Midnight Cherry Red"),
    ("PMSS", "Silver Metallic"),
    ("PMTG", "Midnight Silver Metallic"),
    ("PMAB", "Quicksilver"),
    ("PMSG", "Stealth Grey"),
    ("PMMB", "Ultra Blue"),
    ("PN00", "Midnight Silver Metallic"),
    ("PN01", "Solid Black"),
    ("PPMR", "Red Multi-Coat"),
    ("PPSB", "Obsidian Black Metallic"),
    ("PPSW", "Pearl White Multi-Coat"),
    ("PR00", "Pearl White Multi-Coat"),
    ("PR01", "Solid Black"),
    // Interior
    ("IBB0", "All Black Interior"),
    ("IBB1", "All Black Interior"),
    ("IBE0", "Black & White Interior"),
    ("IPB0", "Black Premium Interior"),
    ("IPB1", "Black Premium Interior"),
    ("IPB11", "Black Premium Interior"),
    ("IPW0", "White Premium Interior"),
    ("IPW1", "White Premium Interior"),
    ("IN3BB", "All Black Premium Interior"),
    ("IN3BW", "Black and White Premium Interior"),
    ("IN3PB", "Black Premium Interior"),
    ("IN3PW", "White Premium Interior"),
    // Battery
    ("BT37", "75 kWh Battery"),
    ("BT85", "85 kWh Battery"),
    ("BTX5", "75 kWh Battery"),
    ("BTX6", "100 kWh Battery"),
    ("BTX8", "100 kWh Battery"),
    // Drive and model
    ("DV2W", "Rear-Wheel Drive"),
    ("DV4W", "All-Wheel Drive (Dual Motor)"),
    ("DRRL", "Rear-Wheel Drive Long Range"),
    ("MDL3", "Model 3"),
    ("MDLS", "Model S"),
    ("MDLX", "Model X"),
    ("MDLY", "Model Y"),
    ("MTY52", "Model Y Long Range All-Wheel Drive"),
    ("MTY53", "Model Y Performance"),
    ("MT351", "Model 3 Long Range All-Wheel Drive"),
    ("REEU", "European Region"),
    ("RENA", "North American Region"),
    ("RENC", "Canadian Region"),
    // Wheels
    ("W38B", "18\" Aero Wheels"),
    ("W39B", "19\" Sport Wheels"),
    ("W40B", "18\" Aero Wheels"),
    ("W41B", "19\" Gemini Wheels"),
    ("WS90", "19\" Tempest Wheels"),
    ("WY18B", "18\" Aero Wheels"),
    ("WY19B", "19\" Gemini Wheels"),
    ("WY19P", "19\" Sport Wheels"),
    ("WY20P", "20\" Induction Wheels"),
    ("WY21P", "21\" Uberturbine Wheels"),
    // Seats
    ("ST01", "Performance Seats"),
    ("STY5S", "5 Seat Interior"),
    ("STY7S", "7 Seat Interior"),
    // Towing
    ("TW00", "No Tow Hitch"),
    ("TW01", "Tow Hitch"),
    // Charging
    ("CH00", "Standard Charging"),
    ("CH04", "72 Amp Charger"),
    ("CH07", "48 Amp Charger"),
    ("SC04", "Supercharger Pay-Per-Use"),
    ("SC05", "Free Unlimited Supercharging"),
    ("CPF0", "Standard Connectivity"),
    ("CPF1", "Premium Connectivity"),
    // Other
    ("SU03", "Performance Suspension"),
    ("TR01", "Roof Rack"),
    ("UM01", "Universal Mobile Connector"),
    ("ZINV", "Inventory Vehicle"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOption {
    pub code: String,
    /// `None` for codes missing from the table.
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionCategory {
    Model,
    Paint,
    Interior,
    Wheels,
    Autopilot,
    Charging,
    Other,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 7] = [
        OptionCategory::Model,
        OptionCategory::Paint,
        OptionCategory::Interior,
        OptionCategory::Wheels,
        OptionCategory::Autopilot,
        OptionCategory::Charging,
        OptionCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptionCategory::Model => "Model",
            OptionCategory::Paint => "Paint",
            OptionCategory::Interior => "Interior",
            OptionCategory::Wheels => "Wheels",
            OptionCategory::Autopilot => "Autopilot",
            OptionCategory::Charging => "Charging",
            OptionCategory::Other => "Other",
        }
    }

    pub fn of(code: &str) -> Self {
        const PAINT_PREFIXES: [&str; 5] = ["PP", "PM", "PB", "PN", "PR"];
        if code.starts_with("MDL") || code.starts_with("MT") {
            OptionCategory::Model
        } else if PAINT_PREFIXES.iter().any(|p| code.starts_with(p)) {
            OptionCategory::Paint
        } else if code.starts_with('I') || code.starts_with("ST") {
            OptionCategory::Interior
        } else if code.starts_with('W') {
            OptionCategory::Wheels
        } else if code.starts_with("AP") {
            OptionCategory::Autopilot
        } else if code.starts_with("SC") || code.starts_with("CH") {
            OptionCategory::Charging
        } else {
            OptionCategory::Other
        }
    }
}

pub fn decode_option_code(code: &str) -> Option<&'static str> {
    OPTION_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

/// Split a comma separated option string, skipping blank codes.
pub fn decode_options(options: &str) -> Vec<DecodedOption> {
    options
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| DecodedOption {
            code: code.to_string(),
            description: decode_option_code(code),
        })
        .collect()
}

/// Group options by category, in [`OptionCategory::ALL`] order, omitting
/// empty categories.
pub fn categorize(options: &[DecodedOption]) -> Vec<(OptionCategory, Vec<&DecodedOption>)> {
    OptionCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&DecodedOption> = options
                .iter()
                .filter(|opt| OptionCategory::of(&opt.code) == category)
                .collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}
