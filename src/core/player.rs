//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! One of the four fixed seats. Seats are 0-based and their order is the
//! turn order: `PlayerId(0)` moves first, then play proceeds cyclically.
//!
//! ## PlayerMap
//!
//! Fixed per-player storage backed by an array for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::state::InvariantViolation;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 4;

/// Seat colour, in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// Opaque ARGB value for renderers.
    #[must_use]
    pub const fn argb(self) -> u32 {
        match self {
            Color::Red => 0xFFFF_0000,
            Color::Green => 0xFF00_FF00,
            Color::Yellow => 0xFFFF_FF00,
            Color::Blue => 0xFF00_00FF,
        }
    }

    /// Upper-case name used in status messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
        }
    }
}

/// Player identifier, always in `0..PLAYER_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const RED: PlayerId = PlayerId(0);
    pub const GREEN: PlayerId = PlayerId(1);
    pub const YELLOW: PlayerId = PlayerId(2);
    pub const BLUE: PlayerId = PlayerId(3);

    /// Create a player ID.
    ///
    /// Panics if `id >= PLAYER_COUNT`.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "player id out of range");
        Self(id)
    }

    /// Create a player ID, or `None` if out of range.
    #[must_use]
    pub const fn try_new(id: u8) -> Option<Self> {
        if (id as usize) < PLAYER_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player who moves after this one.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::RED.next(), PlayerId::GREEN);
    /// assert_eq!(PlayerId::BLUE.next(), PlayerId::RED);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self.0 {
            0 => Color::Red,
            1 => Color::Green,
            2 => Color::Yellow,
            _ => Color::Blue,
        }
    }

    /// Iterate over all seats in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.color().name())
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvariantViolation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(InvariantViolation::UnknownPlayer(value))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{PlayerId, PlayerMap};
///
/// let mut home: PlayerMap<u8> = PlayerMap::with_value(0);
/// home[PlayerId::GREEN] = 2;
///
/// assert_eq!(home[PlayerId::RED], 0);
/// assert_eq!(home[PlayerId::GREEN], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(PlayerId(i as u8))),
        }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::RED.index(), 0);
        assert_eq!(PlayerId::BLUE.index(), 3);
        assert_eq!(format!("{}", PlayerId::YELLOW), "YELLOW");
        assert_eq!(PlayerId::try_new(4), None);
    }

    #[test]
    fn test_turn_order_is_cyclic() {
        let order: Vec<_> = PlayerId::all().collect();
        assert_eq!(
            order,
            vec![PlayerId::RED, PlayerId::GREEN, PlayerId::YELLOW, PlayerId::BLUE]
        );

        for player in PlayerId::all() {
            assert_eq!(player.next().next().next().next(), player);
        }
    }

    #[test]
    #[should_panic(expected = "player id out of range")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(4);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);

        assert_eq!(map[PlayerId::RED], 0);
        assert_eq!(map[PlayerId::GREEN], 10);
        assert_eq!(map[PlayerId::YELLOW], 20);
        assert_eq!(map[PlayerId::BLUE], 30);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::with_default();
        map[PlayerId::YELLOW] = 7;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), PLAYER_COUNT);
        assert_eq!(pairs[2], (PlayerId::YELLOW, &7));
        assert_eq!(pairs[3], (PlayerId::BLUE, &0));
    }

    #[test]
    fn test_player_id_serde_rejects_out_of_range() {
        let json = serde_json::to_string(&PlayerId::GREEN).unwrap();
        assert_eq!(json, "1");
        assert_eq!(serde_json::from_str::<PlayerId>(&json).unwrap(), PlayerId::GREEN);
        assert!(serde_json::from_str::<PlayerId>("9").is_err());
    }

    #[test]
    fn test_player_id_try_from() {
        assert_eq!(PlayerId::try_from(2u8), Ok(PlayerId::YELLOW));
        assert_eq!(
            PlayerId::try_from(4u8),
            Err(InvariantViolation::UnknownPlayer(4))
        );
    }
}
