use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_STRENGTH: u8 = 3;
pub const MAX_STRENGTH: u8 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("invalid card id {0:#04x}")]
    InvalidId(u8),
    #[error("invalid rank value {0}")]
    InvalidRank(u8),
    #[error("invalid card label {0:?}")]
    InvalidLabel(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Diamonds = 1,
    Spades = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn mask(self) -> SuitMask {
        SuitMask(1 << self.index())
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|suit| suit.symbol() == symbol)
    }
}

/// Rank values double as the normal strength scale: 3..13, Ace 14, Two 15, Joker 16.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    Joker = 16,
}

impl Rank {
    /// Suited ranks in ascending normal strength.
    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub const EIGHT_CUT: Rank = Rank::Eight;
    pub const JACK_BACK: Rank = Rank::Jack;

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Result<Self, CardError> {
        if value == Rank::Joker.value() {
            return Ok(Rank::Joker);
        }
        Self::SUITED
            .into_iter()
            .find(|rank| rank.value() == value)
            .ok_or(CardError::InvalidRank(value))
    }

    /// Straights run over 3..K only.
    pub fn in_straight_range(self) -> bool {
        (Rank::Three..=Rank::King).contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Joker => "JK",
        }
    }
}

/// Comparable strength of `rank` under the active inversions.
///
/// Revolution and jack-back compose by XOR. When inverted the scale is
/// mirrored onto itself, so equal strengths stay equal and 3 becomes the
/// strongest card while the Joker becomes the weakest.
pub fn effective_rank(rank: Rank, revolution: bool, jack_back: bool) -> u8 {
    let strength = rank.value();
    if revolution ^ jack_back {
        (MAX_STRENGTH + MIN_STRENGTH) - strength
    } else {
        strength
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SuitMask(u8);

impl SuitMask {
    pub const EMPTY: SuitMask = SuitMask(0);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub fn with(self, suit: Suit) -> Self {
        Self(self.0 | suit.mask().0)
    }

    pub fn contains(self, suit: Suit) -> bool {
        self.0 & suit.mask().0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn suits(self) -> impl Iterator<Item = Suit> {
        Suit::ALL.into_iter().filter(move |suit| self.contains(*suit))
    }
}

impl FromIterator<Suit> for SuitMask {
    fn from_iter<I: IntoIterator<Item = Suit>>(iter: I) -> Self {
        iter.into_iter().fold(SuitMask::EMPTY, SuitMask::with)
    }
}

impl fmt::Display for SuitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, suit) in self.suits().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", suit.symbol())?;
        }
        write!(f, "}}")
    }
}

/// A card packed as `(rank << 2) | suit`.
///
/// Ordering on the packed id is (rank, suit) with the Joker last, which is
/// the hand sort order.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub const JOKER: Card = Card((Rank::Joker as u8) << 2);

    pub fn new(rank: Rank, suit: Suit) -> Self {
        if rank == Rank::Joker {
            return Self::JOKER;
        }
        Self((rank.value() << 2) | suit.index())
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        match Rank::from_value(self.0 >> 2) {
            Ok(rank) => rank,
            Err(_) => unreachable!("card ids are validated on construction"),
        }
    }

    /// `None` for the Joker.
    pub fn suit(self) -> Option<Suit> {
        if self.is_joker() {
            None
        } else {
            Suit::from_index(self.0 & 0b11)
        }
    }

    pub fn is_joker(self) -> bool {
        self == Self::JOKER
    }

    pub fn suit_mask(self) -> SuitMask {
        self.suit().map(Suit::mask).unwrap_or(SuitMask::EMPTY)
    }

    pub fn effective_rank(self, revolution: bool, jack_back: bool) -> u8 {
        effective_rank(self.rank(), revolution, jack_back)
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        let rank = Rank::from_value(id >> 2).map_err(|_| CardError::InvalidId(id))?;
        if rank == Rank::Joker && id & 0b11 != 0 {
            return Err(CardError::InvalidId(id));
        }
        Ok(Self(id))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.id()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit() {
            Some(suit) => write!(f, "{}{}", self.rank().label(), suit.symbol()),
            None => write!(f, "{}", Rank::Joker.label()),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses labels such as `7H`, `10S`, `QD`, `2C` or `JK`.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidLabel(label.to_string());
        if label.eq_ignore_ascii_case("JK") {
            return Ok(Card::JOKER);
        }
        let mut chars = label.chars();
        let suit = chars
            .next_back()
            .and_then(|c| Suit::from_symbol(c.to_ascii_uppercase()))
            .ok_or_else(invalid)?;
        let rank_label = chars.as_str().to_ascii_uppercase();
        let rank = Rank::SUITED
            .into_iter()
            .find(|rank| rank.label() == rank_label)
            .ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}
