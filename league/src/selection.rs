
use rand::Rng;

use utils::{Serialize, Deserialize};
use utils::error::*;

use super::record::OpponentId;

///
/// The selection rules that can be named in configuration.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind 
{
    Latest,
    Uniform,
    Recent
}

///
/// Represents a selection config.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config 
{
    #[serde(default = "policy")]
    pub policy: PolicyKind,

    #[serde(default = "window")]
    pub window: usize,

    #[serde(default)]
    pub seed: Option<u64>
}

impl Default for Config 
{
    fn default () -> Config 
    {
        Config 
        {
            policy: policy(),
            window: window(),
            seed: None
        }
    }
}

impl Config 
{
    pub fn validate (& self) -> Result<()>
    {
        if self.window == 0 
        {
            bail!("selection.window must be at least 1.");
        }
        Ok(())
    }
}

fn policy () -> PolicyKind 
{
    PolicyKind::Latest
}

fn window () -> usize 
{
    5
}

///
/// The rule deciding which registered opponent a requester plays next.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy 
{
    /// The most recently registered opponent.
    Latest,

    /// Any registered opponent, uniformly.
    Uniform,

    /// One of the `window` most recently registered opponents, uniformly.
    Recent { window: usize }
}

impl Default for SelectionPolicy 
{
    fn default () -> SelectionPolicy 
    {
        SelectionPolicy::Latest
    }
}

impl From<& Config> for SelectionPolicy 
{
    fn from (config: & Config) -> SelectionPolicy 
    {
        match config.policy 
        {
            PolicyKind::Latest  => SelectionPolicy::Latest,
            PolicyKind::Uniform => SelectionPolicy::Uniform,
            PolicyKind::Recent  => SelectionPolicy::Recent { window: config.window.max(1) }
        }
    }
}

impl SelectionPolicy 
{
    ///
    /// Picks an id from a population of the given size, which is ordered by registration.
    /// Returns None for an empty population.
    ///
    pub fn pick<R: Rng> (& self, population: usize, rng: & mut R) -> Option<OpponentId>
    {
        if population == 0 
        {
            return None;
        }

        let id = match self 
        {
            SelectionPolicy::Latest           => population - 1,
            SelectionPolicy::Uniform          => rng.gen_range(0 .. population),
            SelectionPolicy::Recent { window } => rng.gen_range(population.saturating_sub(* window) .. population)
        };

        Some(id)
    }
}

#[cfg(test)]
mod tests 
{
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn nothing_is_picked_from_nothing ()
    {
        let mut rng = StdRng::seed_from_u64(7);
        for policy in [SelectionPolicy::Latest, SelectionPolicy::Uniform, SelectionPolicy::Recent { window: 3 }]
        {
            assert_eq!(policy.pick(0, & mut rng), None);
        }
    }

    #[test]
    fn latest_picks_the_newest ()
    {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(SelectionPolicy::Latest.pick(1, & mut rng), Some(0));
        assert_eq!(SelectionPolicy::Latest.pick(12, & mut rng), Some(11));
    }

    #[test]
    fn recent_stays_inside_its_window ()
    {
        let mut rng = StdRng::seed_from_u64(7);
        let policy = SelectionPolicy::Recent { window: 3 };

        for _ in 0 .. 200 
        {
            let id = policy.pick(10, & mut rng).unwrap();
            assert!((7 .. 10).contains(& id));
        }

        for _ in 0 .. 50 
        {
            assert!(policy.pick(2, & mut rng).unwrap() < 2);
        }
    }

    #[test]
    fn uniform_reaches_the_whole_pool ()
    {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];

        for _ in 0 .. 400 
        {
            seen[SelectionPolicy::Uniform.pick(4, & mut rng).unwrap()] = true;
        }

        assert!(seen.iter().all(|s| * s));
    }

    #[test]
    fn config_names_the_policy ()
    {
        let config = Config { policy: PolicyKind::Recent, window: 4, seed: None };
        assert_eq!(SelectionPolicy::from(& config), SelectionPolicy::Recent { window: 4 });
        assert_eq!(SelectionPolicy::from(& Config::default()), SelectionPolicy::Latest);
        assert!(Config { window: 0, ..Config::default() }.validate().is_err());
    }
}
