
use parking_lot::{Mutex, RwLock};

use rand::SeedableRng;
use rand::rngs::StdRng;

use utils::log;

use super::error::{Error, Result};
use super::outcome::Outcome;
use super::rating::{self, Rating, RatingEngine};
use super::record::{Metadata, OpponentId, OpponentRecord};
use super::selection::{self, SelectionPolicy};

///
/// The authoritative store of every registered opponent.
///
/// Records live in an append-only vector indexed by id. Registration and match
/// reports take the write lock for a constant amount of work, so every mutation is
/// applied whole or not at all, and readers only ever see committed states.
///
pub struct Registry 
{
    engine: RatingEngine,
    policy: SelectionPolicy,
    opponents: RwLock<Vec<OpponentRecord>>,
    rng: Mutex<StdRng>
}

impl Default for Registry 
{
    fn default () -> Registry 
    {
        Registry::new(RatingEngine::default(), SelectionPolicy::default(), None)
    }
}

impl Registry 
{
    ///
    /// Creates an empty registry. Randomized selection policies draw from a generator
    /// seeded with `seed`, or from entropy if there is none.
    ///
    pub fn new (engine: RatingEngine, policy: SelectionPolicy, seed: Option<u64>) -> Registry 
    {
        let rng = match seed 
        {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy()
        };

        Registry { engine, policy, opponents: RwLock::new(Vec::new()), rng: Mutex::new(rng) }
    }

    ///
    /// Creates an empty registry from the rating and selection configs.
    ///
    pub fn from_config (rating: & rating::Config, selection: & selection::Config) -> Registry 
    {
        Registry::new(RatingEngine::new(* rating), SelectionPolicy::from(selection), selection.seed)
    }

    pub fn engine (& self) -> & RatingEngine 
    {
        & self.engine
    }

    pub fn policy (& self) -> SelectionPolicy 
    {
        self.policy
    }

    ///
    /// Registers a new opponent and returns its id.
    ///
    pub fn register (& self, artifact_ref: & str, metadata: Metadata) -> Result<OpponentId>
    {
        self.register_as(None, artifact_ref, metadata)
    }

    ///
    /// Registers a new opponent under an advisory label and returns its id. The label
    /// is stored for display only; the opponent is always addressed by the returned id.
    ///
    pub fn register_as (& self, label: Option<String>, artifact_ref: & str, metadata: Metadata) -> Result<OpponentId>
    {
        if artifact_ref.trim().is_empty()
        {
            return Err(Error::invalid("An opponent needs a non-empty artifact reference."));
        }

        let mut opponents = self.opponents.write();

        let id = opponents.len();
        let record = OpponentRecord::new(id, label, artifact_ref.to_owned(), metadata, self.engine.prior(), id as u64);
        opponents.push(record);

        log::info!("Registered opponent {} from '{}'.", id, artifact_ref);
        Ok(id)
    }

    ///
    /// Returns the opponent the selection policy picks for the next match.
    ///
    pub fn select (& self) -> Result<OpponentRecord>
    {
        let opponents = self.opponents.read();

        // The default policy never touches the generator, so plain selects only share the read lock.
        let picked = match self.policy 
        {
            SelectionPolicy::Latest => opponents.len().checked_sub(1),
            policy                  => policy.pick(opponents.len(), & mut * self.rng.lock())
        };

        match picked 
        {
            Some(id) => Ok(opponents[id].clone()),
            None     => Err(Error::not_found("No opponents have been registered yet."))
        }
    }

    ///
    /// Returns a copy of the opponent with the given id.
    ///
    pub fn get (& self, id: OpponentId) -> Result<OpponentRecord>
    {
        self.opponents.read()
            .get(id)
            .cloned()
            .ok_or_else(|| unknown(id))
    }

    ///
    /// Applies the outcome of a match between `a` and `b` to both of their ratings as
    /// one step, and returns the new ratings in the same order.
    ///
    pub fn report_result (& self, a: OpponentId, b: OpponentId, outcome: Outcome) -> Result<(Rating, Rating)>
    {
        if a == b 
        {
            return Err(Error::invalid(format!("Opponent {} cannot play against itself.", a)));
        }

        let mut opponents = self.opponents.write();

        let rating_a = opponents.get(a).ok_or_else(|| unknown(a))?.rating;
        let rating_b = opponents.get(b).ok_or_else(|| unknown(b))?.rating;

        let (next_a, next_b) = self.engine.update(& rating_a, & rating_b, outcome);
        opponents[a].rating = next_a;
        opponents[b].rating = next_b;

        log::debug!("Rated {} vs {} ({}): {} -> {}, {} -> {}.", a, b, outcome.score(), rating_a, next_a, rating_b, next_b);
        Ok((next_a, next_b))
    }

    pub fn len (& self) -> usize 
    {
        self.opponents.read().len()
    }

    pub fn is_empty (& self) -> bool 
    {
        self.opponents.read().is_empty()
    }

    ///
    /// Returns a consistent copy of every record, in id order.
    ///
    pub fn snapshot (& self) -> Vec<OpponentRecord>
    {
        self.opponents.read().clone()
    }

    ///
    /// Returns every record from the highest rating down; ties go to the older opponent.
    ///
    pub fn standings (& self) -> Vec<OpponentRecord>
    {
        let mut records = self.snapshot();
        records.sort_by(|x, y| y.rating.mu.total_cmp(& x.rating.mu).then(x.id.cmp(& y.id)));
        records
    }
}

fn unknown (id: OpponentId) -> Error 
{
    Error::not_found(format!("No opponent with id {}.", id))
}
