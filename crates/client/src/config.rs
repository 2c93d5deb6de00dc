//! Process settings read from the environment.
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which behavior the node drives every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BehaviorKind {
    #[default]
    Chase,
    Shoot,
    Reload,
}

impl FromStr for BehaviorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chase" => Ok(Self::Chase),
            "shoot" => Ok(Self::Shoot),
            "reload" => Ok(Self::Reload),
            other => Err(format!("unknown behavior '{other}'")),
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chase => "chase",
            Self::Shoot => "shoot",
            Self::Reload => "reload",
        })
    }
}

#[derive(Clone, Debug)]
pub struct NodeConfig {
    pub namespace: String,
    pub config_path: PathBuf,
    pub behavior: BehaviorKind,
    pub tick_hz: u32,
    pub max_ticks: u64,
    pub log_dir: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            namespace: "r1".to_string(),
            config_path: PathBuf::from("crates/decision/content/data/decision.toml"),
            behavior: BehaviorKind::default(),
            tick_hz: 10,
            max_ticks: 200,
            log_dir: None,
        }
    }
}

impl NodeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ROBOT_NAMESPACE` - Robot namespace, e.g. `r1` or `//r3` (default: r1)
    /// - `DECISION_CONFIG` - Path to the decision TOML file
    /// - `DECISION_BEHAVIOR` - `chase`, `shoot` or `reload` (default: chase)
    /// - `DECISION_TICK_HZ` - Tick rate (default: 10)
    /// - `DECISION_MAX_TICKS` - Ticks before the node exits (default: 200)
    /// - `DECISION_LOG_DIR` - Also write logs to `decision.log` here (optional)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(namespace) = env::var("ROBOT_NAMESPACE") {
            config.namespace = namespace;
        }

        if let Ok(path) = env::var("DECISION_CONFIG") {
            config.config_path = PathBuf::from(path);
        }

        match env::var("DECISION_BEHAVIOR").map(|raw| raw.parse::<BehaviorKind>()) {
            Ok(Ok(kind)) => config.behavior = kind,
            // Logging is not installed yet.
            Ok(Err(e)) => eprintln!("{e}; falling back to {}", config.behavior),
            Err(_) => {}
        }

        if let Some(hz) = read_env::<u32>("DECISION_TICK_HZ") {
            config.tick_hz = hz.max(1);
        }

        if let Some(ticks) = read_env::<u64>("DECISION_MAX_TICKS") {
            config.max_ticks = ticks;
        }

        config.log_dir = env::var("DECISION_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_names_are_case_insensitive() {
        assert_eq!("Reload".parse::<BehaviorKind>(), Ok(BehaviorKind::Reload));
        assert_eq!(" shoot ".parse::<BehaviorKind>(), Ok(BehaviorKind::Shoot));
        assert!("patrol".parse::<BehaviorKind>().is_err());
    }

    #[test]
    fn defaults_tick_at_ten_hertz() {
        let config = NodeConfig::default();
        assert_eq!(config.tick_hz, 10);
        assert_eq!(config.max_ticks, 200);
        assert_eq!(config.behavior, BehaviorKind::Chase);
    }
}
