//! Collated string comparison and the sibling ordering rule.
//!
//! The comparison works in levels, as a locale collator does:
//!
//! 1. primary: case-folded characters, with punctuation and whitespace
//!    before digits before letters;
//! 2. tertiary: at the first case difference, lowercase sorts first;
//! 3. final: plain code-point order, so distinct strings never compare equal.

use std::cmp::Ordering;

use crate::edge::CallEdgeNode;

/// Compares two strings using the multi-level collation described above.
#[must_use]
pub fn collate(left: &str, right: &str) -> Ordering {
    primary_weights(left)
        .cmp(primary_weights(right))
        .then_with(|| case_weights(left).cmp(case_weights(right)))
        .then_with(|| left.cmp(right))
}

fn primary_weights(text: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|folded| (character_class(folded), folded))
}

fn character_class(character: char) -> u8 {
    if character.is_alphabetic() {
        2
    } else if character.is_numeric() {
        1
    } else {
        0
    }
}

fn case_weights(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().map(|character| u8::from(character.is_uppercase()))
}

/// Sorts sibling edges into their response order.
///
/// Primary key: [`collate`] over the related symbol's resource path followed
/// by its display name. Secondary key: the triggering occurrence's offset.
/// Occurrence identity breaks any remaining tie.
pub fn sort_siblings(nodes: &mut Vec<CallEdgeNode>) {
    let mut keyed: Vec<(String, CallEdgeNode)> = nodes
        .drain(..)
        .map(|node| (node.symbol().ordering_key(), node))
        .collect();
    keyed.sort_by(|(left_key, left), (right_key, right)| {
        collate(left_key, right_key)
            .then_with(|| left.occurrence().offset().cmp(&right.occurrence().offset()))
            .then_with(|| left.occurrence().id().cmp(&right.occurrence().id()))
    });
    nodes.extend(keyed.into_iter().map(|(_, node)| node));
}
