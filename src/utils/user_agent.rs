//! User-agent string classification.
//!
//! Best-effort parsing of the raw `User-Agent` header into coarse
//! browser/OS/device buckets for analytics. Unknown or missing input yields
//! "Unknown" fields rather than an error; click ingestion never fails on a
//! strange user agent.

/// Coarse device classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Desktop,
    Mobile,
    Tablet,
    Bot,
    Unknown,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Desktop => "Desktop",
            DeviceKind::Mobile => "Mobile",
            DeviceKind::Tablet => "Tablet",
            DeviceKind::Bot => "Bot",
            DeviceKind::Unknown => "Unknown",
        }
    }
}

/// Structured client information parsed from a user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub browser: String,
    pub os: String,
    pub device: DeviceKind,
}

impl ClientInfo {
    pub fn unknown() -> Self {
        Self {
            browser: "Unknown".to_string(),
            os: "Unknown".to_string(),
            device: DeviceKind::Unknown,
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Parses a raw user-agent string into [`ClientInfo`].
///
/// Token checks are ordered to resolve ambiguity: Edge and Opera advertise
/// "Chrome", Chrome advertises "Safari", so the more specific tokens are
/// checked first. An empty or unrecognized string yields
/// [`ClientInfo::unknown`].
pub fn parse(user_agent: &str) -> ClientInfo {
    let ua = user_agent.trim().to_ascii_lowercase();
    if ua.is_empty() {
        return ClientInfo::unknown();
    }

    let device = detect_device(&ua);
    let browser = detect_browser(&ua);
    let os = detect_os(&ua);

    ClientInfo {
        browser: browser.to_string(),
        os: os.to_string(),
        device,
    }
}

fn detect_device(ua: &str) -> DeviceKind {
    const BOT_TOKENS: [&str; 6] = ["bot", "crawler", "spider", "curl/", "wget/", "python-requests"];
    if BOT_TOKENS.iter().any(|t| ua.contains(t)) {
        return DeviceKind::Bot;
    }

    if ua.contains("ipad") || ua.contains("tablet") {
        return DeviceKind::Tablet;
    }
    // Android tablets omit the "mobile" token.
    if ua.contains("android") && !ua.contains("mobile") {
        return DeviceKind::Tablet;
    }
    if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        return DeviceKind::Mobile;
    }

    DeviceKind::Desktop
}

fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("edg/") || ua.contains("edge/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("firefox/") {
        "Firefox"
    } else if ua.contains("chrome/") || ua.contains("crios/") {
        "Chrome"
    } else if ua.contains("safari/") {
        "Safari"
    } else if ua.contains("msie") || ua.contains("trident/") {
        "Internet Explorer"
    } else {
        "Unknown"
    }
}

fn detect_os(ua: &str) -> &'static str {
    if ua.contains("windows") {
        "Windows"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "iOS"
    } else if ua.contains("mac os x") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        "Unknown"
    }
}
