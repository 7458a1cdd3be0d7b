//! Creature records, the dataset container, and the ranking criteria.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column contract the live table must satisfy.
pub const EXPECTED_COLUMNS: [&str; 17] = [
    "index",
    "name",
    "type_1",
    "type_2",
    "total",
    "hp",
    "attack",
    "defense",
    "special_attack",
    "special_defense",
    "speed",
    "generation",
    "legendary",
    "base_stats",
    "off_stats",
    "def_stats",
    "overall_score",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub index: i64,
    pub name: String,
    pub type_1: String,
    /// Secondary type, empty for single-typed creatures.
    pub type_2: String,
    pub total: i64,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub special_attack: i64,
    pub special_defense: i64,
    pub speed: i64,
    pub generation: i64,
    pub legendary: bool,
    pub base_stats: i64,
    pub off_stats: i64,
    pub def_stats: i64,
    pub overall_score: i64,
}

/// Ordered collection of records sharing the column contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Creature>,
}

impl Dataset {
    pub fn new(rows: Vec<Creature>) -> Self {
        Self {
            columns: EXPECTED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    /// Distinct primary types in sorted order. Populates the category
    /// dropdown once, at startup.
    pub fn category_options(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|c| c.type_1.as_str()).collect();
        set.into_iter().map(|s| s.to_string()).collect()
    }
}

/// The numeric attributes a user can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    OverallScore,
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::OverallScore,
        Criterion::Hp,
        Criterion::Attack,
        Criterion::Defense,
        Criterion::SpecialAttack,
        Criterion::SpecialDefense,
        Criterion::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::OverallScore => "overall_score",
            Criterion::Hp => "hp",
            Criterion::Attack => "attack",
            Criterion::Defense => "defense",
            Criterion::SpecialAttack => "special_attack",
            Criterion::SpecialDefense => "special_defense",
            Criterion::Speed => "speed",
        }
    }

    pub fn parse(s: &str) -> Option<Criterion> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    pub fn value_of(&self, c: &Creature) -> i64 {
        match self {
            Criterion::OverallScore => c.overall_score,
            Criterion::Hp => c.hp,
            Criterion::Attack => c.attack,
            Criterion::Defense => c.defense,
            Criterion::SpecialAttack => c.special_attack,
            Criterion::SpecialDefense => c.special_defense,
            Criterion::Speed => c.speed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaReport {
    pub columns: Vec<String>,
    pub expected: Vec<String>,
    pub ok: bool,
    pub message: String,
}

/// Check a live result set's columns against the contract. Extra columns
/// are tolerated; missing ones are not.
pub fn validate_schema(columns: &[String]) -> SchemaReport {
    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|want| !columns.iter().any(|got| got == want))
        .collect();
    let ok = missing.is_empty();
    let message = if ok {
        "schema ok".to_string()
    } else {
        format!("missing columns: {}", missing.join(", "))
    };
    SchemaReport {
        columns: columns.to_vec(),
        expected: EXPECTED_COLUMNS.iter().map(|s| s.to_string()).collect(),
        ok,
        message,
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    index: i64,
    name: &str,
    type_1: &str,
    type_2: &str,
    total: i64,
    hp: i64,
    attack: i64,
    defense: i64,
    special_attack: i64,
    special_defense: i64,
    speed: i64,
    generation: i64,
    legendary: bool,
    base_stats: i64,
    off_stats: i64,
    def_stats: i64,
    overall_score: i64,
) -> Creature {
    Creature {
        index,
        name: name.to_string(),
        type_1: type_1.to_string(),
        type_2: type_2.to_string(),
        total,
        hp,
        attack,
        defense,
        special_attack,
        special_defense,
        speed,
        generation,
        legendary,
        base_stats,
        off_stats,
        def_stats,
        overall_score,
    }
}

/// The fixed dataset substituted whenever live loading fails.
pub fn fallback_dataset() -> Dataset {
    Dataset::new(vec![
        record(1, "Bulbasaur", "Grass", "Poison", 318, 45, 49, 49, 65, 65, 45, 1, false, 318, 159, 159, 420),
        record(2, "Ivysaur", "Grass", "Poison", 405, 60, 62, 63, 80, 80, 60, 1, false, 405, 202, 203, 536),
        record(3, "Venusaur", "Grass", "Poison", 525, 80, 82, 83, 100, 100, 80, 1, false, 525, 262, 263, 696),
        record(3, "VenusaurMega Venusaur", "Grass", "Poison", 625, 80, 100, 123, 122, 120, 80, 1, false, 625, 302, 323, 816),
        record(4, "Charmander", "Fire", "", 309, 39, 52, 43, 60, 50, 65, 1, false, 309, 177, 132, 430),
    ])
}
