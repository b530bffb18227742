use crate::logging::LogLevel;

const DEFAULT_THEME_KEY: &str = "portfolio-theme";
const DEFAULT_VISITOR_KEY: &str = "portfolio-visitor-count";
const DEFAULT_VISITOR_BASELINE_MIN: u64 = 100;
const DEFAULT_VISITOR_BASELINE_MAX: u64 = 600;
const DEFAULT_LOADING_DELAY_MS: u32 = 1_000;
const DEFAULT_HEADER_SCROLL_OFFSET: u32 = 20;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const VISITOR_BASELINE_MIN_BOUNDS: (u64, u64) = (0, 1_000_000);
const VISITOR_BASELINE_MAX_BOUNDS: (u64, u64) = (1, 1_000_001);
const LOADING_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const HEADER_SCROLL_OFFSET_BOUNDS: (u32, u32) = (0, 1_000);

/// Startup tuning for the interaction layer.
///
/// In the browser the values come from `data-*` attributes on the mount
/// element, so a deployment can retune the page without rebuilding it.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub theme_key: String,
    pub visitor_key: String,
    /// Half-open `[min, max)` range for the first-visit seed.
    pub visitor_baseline: (u64, u64),
    pub loading_delay_ms: u32,
    pub header_scroll_offset: u32,
    pub log_level: LogLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            theme_key: DEFAULT_THEME_KEY.to_string(),
            visitor_key: DEFAULT_VISITOR_KEY.to_string(),
            visitor_baseline: (DEFAULT_VISITOR_BASELINE_MIN, DEFAULT_VISITOR_BASELINE_MAX),
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            header_scroll_offset: DEFAULT_HEADER_SCROLL_OFFSET,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl RuntimeConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme_key = parse_non_empty_string(&lookup, "theme-key")
            .unwrap_or_else(|| DEFAULT_THEME_KEY.to_string());
        let visitor_key = parse_non_empty_string(&lookup, "visitor-key")
            .unwrap_or_else(|| DEFAULT_VISITOR_KEY.to_string());
        let baseline_min = parse_u64_with_bounds(
            &lookup,
            "visitor-baseline-min",
            DEFAULT_VISITOR_BASELINE_MIN,
            VISITOR_BASELINE_MIN_BOUNDS,
        );
        let baseline_max = parse_u64_with_bounds(
            &lookup,
            "visitor-baseline-max",
            DEFAULT_VISITOR_BASELINE_MAX,
            VISITOR_BASELINE_MAX_BOUNDS,
        );
        let visitor_baseline = if baseline_min < baseline_max {
            (baseline_min, baseline_max)
        } else {
            (DEFAULT_VISITOR_BASELINE_MIN, DEFAULT_VISITOR_BASELINE_MAX)
        };
        let loading_delay_ms = parse_u32_with_bounds(
            &lookup,
            "loading-delay-ms",
            DEFAULT_LOADING_DELAY_MS,
            LOADING_DELAY_MS_BOUNDS,
        );
        let header_scroll_offset = parse_u32_with_bounds(
            &lookup,
            "header-scroll-offset",
            DEFAULT_HEADER_SCROLL_OFFSET,
            HEADER_SCROLL_OFFSET_BOUNDS,
        );
        let log_level = parse_log_level(&lookup, "log-level", DEFAULT_LOG_LEVEL);

        Self {
            theme_key,
            visitor_key,
            visitor_baseline,
            loading_delay_ms,
            header_scroll_offset,
            log_level,
        }
    }
}

fn parse_u64_with_bounds<F>(lookup: &F, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u32_with_bounds<F>(lookup: &F, name: &str, default: u32, bounds: (u32, u32)) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level<F>(lookup: &F, name: &str, default: LogLevel) -> LogLevel
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| LogLevel::from_str(&value))
        .unwrap_or(default)
}
