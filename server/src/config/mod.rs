
use std::fs;

use utils::{Serialize, Deserialize};
use utils::error::*;

pub use league::rating::Config as RatingConfig;
pub use league::selection::Config as SelectionConfig;

///
/// Represents a full configuration.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config 
{
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rating: RatingConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default = "log_path")]
    pub log_path: String,

    #[serde(default = "log_level")]
    pub log_level: String
}

impl Default for Config 
{
    fn default () -> Config 
    {
        Config 
        {
            server: ServerConfig::default(),
            rating: RatingConfig::default(),
            selection: SelectionConfig::default(),
            log_path: log_path(),
            log_level: log_level()
        }
    }
}

impl Config 
{
    ///
    /// Reads a configuration from a TOML file. Missing keys take their defaults.
    ///
    pub fn load (path: & str) -> Result<Config>
    {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'.", path))?;

        let config : Config = toml::from_str(& config_str)
            .with_context(|| format!("Invalid config file '{}'.", path))?;

        Ok(config)
    }

    ///
    /// Checks every section for values the service cannot run with.
    ///
    pub fn validate (& self) -> Result<()>
    {
        self.server.validate()?;
        self.rating.validate()?;
        self.selection.validate()?;
        Ok(())
    }
}

///
/// Where and how the HTTP interface listens.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig 
{
    #[serde(default = "bind")]
    pub bind: String,

    /// Routes are served at the root and, if this is non-empty, again beneath it.
    #[serde(default = "route_prefix")]
    pub route_prefix: String
}

impl Default for ServerConfig 
{
    fn default () -> ServerConfig 
    {
        ServerConfig { bind: bind(), route_prefix: route_prefix() }
    }
}

impl ServerConfig 
{
    pub fn validate (& self) -> Result<()>
    {
        if self.bind.trim().is_empty()
        {
            bail!("server.bind must name an address.");
        }

        let prefix = self.route_prefix.as_str();
        if ! prefix.is_empty() && (! prefix.starts_with('/') || prefix == "/" || prefix.ends_with('/'))
        {
            bail!("server.route_prefix must look like '/name', got '{}'.", prefix);
        }

        Ok(())
    }
}

fn bind () -> String 
{
    "0.0.0.0:8000".to_owned()
}

fn route_prefix () -> String 
{
    "/selfplay".to_owned()
}

fn log_path () -> String 
{
    "logs".to_owned()
}

fn log_level () -> String 
{
    "info".to_owned()
}

#[cfg(test)]
mod tests 
{
    use super::*;

    use std::io::Write;

    use league::selection::PolicyKind;

    fn write (contents: & str) -> tempfile::NamedTempFile 
    {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_gives_defaults ()
    {
        let file = write("");
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_their_defaults ()
    {
        let file = write(r#"
            log_level = "debug"

            [server]
            bind = "127.0.0.1:9100"

            [rating]
            k_factor = 16.0
            prior_rating = 0.0

            [selection]
            policy = "recent"
            window = 8
            seed = 3
        "#);

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.bind, "127.0.0.1:9100");
        assert_eq!(config.server.route_prefix, "/selfplay");
        assert_eq!(config.rating.k_factor, 16.0);
        assert_eq!(config.rating.prior_rating, 0.0);
        assert_eq!(config.rating.prior_uncertainty, RatingConfig::default().prior_uncertainty);
        assert_eq!(config.selection.policy, PolicyKind::Recent);
        assert_eq!(config.selection.window, 8);
        assert_eq!(config.selection.seed, Some(3));
    }

    #[test]
    fn unreadable_configs_are_errors ()
    {
        assert!(Config::load("/nonexistent/selfplay.toml").is_err());

        let file = write("[selection]\npolicy = \"favourite\"\n");
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn bad_values_fail_validation ()
    {
        let mut config = Config::default();
        config.rating.k_factor = -4.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.route_prefix = "selfplay/".to_owned();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.route_prefix = String::new();
        assert!(config.validate().is_ok());
    }
}
