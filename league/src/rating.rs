
use utils::{Serialize, Deserialize};
use utils::error::*;

use super::outcome::Outcome;

///
/// A skill estimate: a scalar rating, the uncertainty around it, and how many
/// rated matches have contributed to it.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating 
{
    pub mu: f64,
    pub sigma: f64,
    pub games: u64
}

impl std::fmt::Display for Rating 
{
    fn fmt (& self, f: & mut std::fmt::Formatter<'_>) -> std::fmt::Result 
    {
        write!(f, "{:.1} ± {:.1} ({} games)", self.mu, self.sigma, self.games)
    }
}

///
/// Represents a rating config.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config 
{
    #[serde(default = "k_factor")]
    pub k_factor: f64,

    #[serde(default = "scale")]
    pub scale: f64,

    #[serde(default = "prior_rating")]
    pub prior_rating: f64,

    #[serde(default = "prior_uncertainty")]
    pub prior_uncertainty: f64,

    #[serde(default = "min_uncertainty")]
    pub min_uncertainty: f64,

    #[serde(default = "uncertainty_decay")]
    pub uncertainty_decay: f64,

    #[serde(default)]
    pub max_step: Option<f64>
}

impl Default for Config 
{
    fn default () -> Config 
    { 
        Config 
        {
            k_factor: k_factor(),
            scale: scale(),
            prior_rating: prior_rating(),
            prior_uncertainty: prior_uncertainty(),
            min_uncertainty: min_uncertainty(),
            uncertainty_decay: uncertainty_decay(),
            max_step: None
        }
    }
}

impl Config 
{
    ///
    /// Checks that the configured values describe a usable update rule.
    ///
    pub fn validate (& self) -> Result<()>
    {
        let finite = [
            ("k_factor", self.k_factor),
            ("scale", self.scale),
            ("prior_rating", self.prior_rating),
            ("prior_uncertainty", self.prior_uncertainty),
            ("min_uncertainty", self.min_uncertainty),
            ("uncertainty_decay", self.uncertainty_decay),
            ("max_step", self.max_step.unwrap_or(0.0))
        ];
        for (name, value) in finite 
        {
            if ! value.is_finite()
            {
                bail!("rating.{} must be finite, got {}.", name, value);
            }
        }

        if ! (self.k_factor > 0.0)
        {
            bail!("rating.k_factor must be positive, got {}.", self.k_factor);
        }
        if ! (self.scale > 0.0)
        {
            bail!("rating.scale must be positive, got {}.", self.scale);
        }
        if ! (self.prior_uncertainty > 0.0)
        {
            bail!("rating.prior_uncertainty must be positive, got {}.", self.prior_uncertainty);
        }
        if ! (self.min_uncertainty >= 0.0 && self.min_uncertainty <= self.prior_uncertainty)
        {
            bail!("rating.min_uncertainty must lie in [0, prior_uncertainty], got {}.", self.min_uncertainty);
        }
        if ! (self.uncertainty_decay > 0.0 && self.uncertainty_decay <= 1.0)
        {
            bail!("rating.uncertainty_decay must lie in (0, 1], got {}.", self.uncertainty_decay);
        }
        if let Some(step) = self.max_step 
        {
            if ! (step > 0.0)
            {
                bail!("rating.max_step must be positive, got {}.", step);
            }
        }
        Ok(())
    }

    ///
    /// Returns the largest distance a single match may move a rating.
    ///
    pub fn max_step (& self) -> f64 
    {
        self.max_step.unwrap_or(self.k_factor)
    }
}

fn k_factor () -> f64 
{
    32.0
}

fn scale () -> f64 
{
    400.0
}

fn prior_rating () -> f64 
{
    1000.0
}

fn prior_uncertainty () -> f64 
{
    350.0
}

fn min_uncertainty () -> f64 
{
    50.0
}

fn uncertainty_decay () -> f64 
{
    0.97
}

///
/// Computes rating transitions from match outcomes.
///
/// The rule is Elo with a step scaled by the participants' mean uncertainty: new
/// opponents move at the full `k_factor`, settled ones more slowly. Both sides always
/// move by the same amount in opposite directions, so every update is zero-sum.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatingEngine 
{
    config: Config
}

impl Default for RatingEngine 
{
    fn default () -> RatingEngine 
    {
        RatingEngine::new(Config::default())
    }
}

impl RatingEngine 
{
    pub fn new (config: Config) -> RatingEngine 
    {
        RatingEngine { config }
    }

    pub fn config (& self) -> & Config 
    {
        & self.config
    }

    ///
    /// Returns the rating given to every newly registered opponent.
    ///
    pub fn prior (& self) -> Rating 
    {
        Rating { mu: self.config.prior_rating, sigma: self.config.prior_uncertainty, games: 0 }
    }

    ///
    /// Returns the probability that `a` beats `b`.
    ///
    pub fn expected (& self, a: & Rating, b: & Rating) -> f64 
    {
        1.0 / (1.0 + 10.0_f64.powf((b.mu - a.mu) / self.config.scale))
    }

    ///
    /// Computes two new ratings given the outcome of a match between `a` and `b`.
    ///
    pub fn update (& self, a: & Rating, b: & Rating, outcome: Outcome) -> (Rating, Rating)
    {
        let config = & self.config;

        let confidence = ((a.sigma + b.sigma) / (2.0 * config.prior_uncertainty)).clamp(0.0, 1.0);
        let k = config.k_factor * confidence;

        let bound = config.max_step();
        let delta = (k * (outcome.score() - self.expected(a, b))).clamp(- bound, bound);

        (self.settle(a, delta), self.settle(b, - delta))
    }

    fn settle (& self, rating: & Rating, delta: f64) -> Rating 
    {
        let sigma = (rating.sigma * self.config.uncertainty_decay).max(self.config.min_uncertainty);
        Rating { mu: rating.mu + delta, sigma, games: rating.games + 1 }
    }
}
