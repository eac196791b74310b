//! Static portrait lookup for tournament top scorers.
//!
//! The mapping is a fixed editorial table, not derived from the datasets.
//! Absent keys are an expected outcome, not an error.

use std::collections::HashMap;
use std::sync::OnceLock;

static PORTRAITS: &[(&str, &str)] = &[
    ("Guillermo Stábile", "stabile.png"),
    ("Oldřich Nejedlý", "nejedly.png"),
    ("Leônidas da Silva", "leonidas.png"),
    ("Ademir", "ademir.png"),
    ("Sandor Kocsis", "kocsis.png"),
    ("Just Fontaine", "fontaine.png"),
    ("Garrincha", "garrincha.png"),
    ("Vavá", "vava.png"),
    ("Flórián Albert", "albert.png"),
    ("Valentin Ivanov", "ivanov.png"),
    ("Dražan Jerković", "jerkovic.png"),
    ("Leonel Sánchez", "sanchez.png"),
    ("Eusébio", "eusebio.png"),
    ("Gerd Müller", "muller.png"),
    ("Grzegorz Lato", "lato.png"),
    ("Mario Alberto Kempes", "kempes.png"),
    ("Paolo Rossi", "rossi.png"),
    ("Gary Lineker", "lineker.png"),
    ("Salvatore Schillaci", "schillaci.png"),
    ("Oleg Salenko", "salenko.png"),
    ("Hristo Stoitchkov", "stoitchkov.png"),
    ("Davor Šuker", "suker.png"),
    ("Ronaldo", "ronaldo.png"),
    ("Miroslav Klose", "klose.png"),
    ("Thomas Müller", "muller.png"),
    ("David Villa", "villa.png"),
    ("Wesley Sneijder", "sneijder.png"),
    ("Diego Forlán", "forlan.png"),
    ("James Rodríguez", "james.png"),
    ("Harry Kane", "kane.png"),
    ("Kylian Mbappé", "mbappe.png"),
];

static LOOKUP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Returns the portrait resource for a scorer, or `None` for unknown names.
pub fn portrait(scorer: &str) -> Option<&'static str> {
    let lookup = LOOKUP.get_or_init(|| PORTRAITS.iter().copied().collect());
    lookup.get(scorer).copied()
}
