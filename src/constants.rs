/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-climate-trends/0.1.0";

/// Climate data backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Path of the weather-data endpoint on the backend
pub const WEATHER_DATA_PATH: &str = "/api/weather-data";

/// Backend request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// First year of generated and defaulted year ranges
pub const EPOCH_YEAR: i32 = 1970;

/// Number of years in a generated dataset (1970..=2020)
pub const SAMPLE_YEAR_COUNT: usize = 51;

pub const DAYS_PER_YEAR: usize = 365;

/// Days in each month of a non-leap year
pub const DAYS_IN_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days over which adjacent months are blended at a month boundary
pub const TRANSITION_WINDOW_DAYS: usize = 10;

/// Offsets added to a yearly average to derive a monthly row
pub const SEASONAL_PATTERN: [f64; 12] = [
    -3.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 7.0, 5.0, 2.0, 0.0, -2.0,
];

/// Chart container identifiers
pub const TREND_CHART_CONTAINER: &str = "temperatureChartContainer";
pub const SURFACE_CHART_CONTAINER: &str = "temperature3DChartContainer";
pub const DAILY_CHART_CONTAINER: &str = "dailyTempChartContainer";

/// Regions and the stations/cities available in each
pub const REGIONS: &[(&str, &[&str])] = &[
    ("Jammu and Kashmir", &["SRINAGAR"]),
    ("Punjab", &["AMRITSAR", "PATIALA"]),
    ("Haryana", &["HISSAR", "SAFDARJUNG (actually in Delhi, see below)"]),
    ("Delhi (NCT)", &["SAFDARJUNG (New Delhi)"]),
    ("Rajasthan", &["BIKANER", "JAISALMER", "JODHPUR", "KOTA"]),
    ("Uttar Pradesh", &["BAREILLY", "AGRA", "GWALIOR", "LUCKNOW"]),
    ("Assam", &["DIBRUGARH", "GUWAHATI INTL"]),
    ("Bihar", &["PATNA", "GAYA"]),
    (
        "Madhya Pradesh",
        &[
            "BHOPAL",
            "JABALPUR",
            "SATNA",
            "DEVI AHILYABAI HOLKAR (Indore)",
            "PENDRA ROAD",
        ],
    ),
    ("Jharkhand", &["BIRSA MUNDA (Ranchi)", "JAMSHEDPUR"]),
    ("Tripura", &["AGARTALA"]),
    ("Gujarat", &["BHUJ", "AHMEDABAD", "RAJKOT", "SURAT", "VERAVAL"]),
    ("West Bengal", &["NETAJI SUBHASH CHANDRA BOSE INTL (Kolkata)"]),
    (
        "Chhattisgarh",
        &["JAGDALPUR", "PENDRA ROAD", "DR AMBEDKAR INTL (Raipur)"],
    ),
    ("Odisha", &["JHARSUGUDA", "BALASORE", "BHUBANESHWAR"]),
    (
        "Maharashtra",
        &[
            "CHHATRAPATI SHIVAJI INTL (Mumbai)",
            "AURANGABAD",
            "PUNE",
            "RATNAGIRI",
            "SHOLAPUR",
        ],
    ),
    ("Telangana", &["RAMGUNDAM", "BEGUMPET AIRPORT (Hyderabad)"]),
    ("Andhra Pradesh", &["KAKINADA", "PBO ANANTAPUR", "NELLORE"]),
    ("Goa", &["GOA or PANJIM"]),
    (
        "Karnataka",
        &["BELGAUM", "GADAG", "CHITRADURGA", "BANGALORE", "MANGALORE"],
    ),
    (
        "Tamil Nadu",
        &["CHENNAI INTL", "COIMBATORE", "CUDDALORE", "TIRUCHIRAPPALLI"],
    ),
    ("Kerala", &["KOZHIKODE", "THIRUVANANTHAPURAM"]),
    ("Andaman and Nicobar Islands", &["PORT BLAIR"]),
    ("Lakshadweep", &["MINICOY"]),
];
