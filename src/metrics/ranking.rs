//! Leaderboard ordering
//!
//! Entities are ordered by ascending score, ties broken by ascending name,
//! so the same input always produces the same walk.

use super::Assessments;

/// Entities sorted by `(score, name)`, each paired with its score
pub fn rank_by_score<'a, I, K>(assessments_per_entity: I) -> Vec<(&'a str, &'a Assessments, u64)>
where
    I: IntoIterator<Item = (&'a K, &'a Assessments)>,
    K: AsRef<str> + ?Sized + 'a,
{
    let mut ranked: Vec<(&str, &Assessments, u64)> = assessments_per_entity
        .into_iter()
        .map(|(name, assessments)| (name.as_ref(), assessments, assessments.score()))
        .collect();
    ranked.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Visit every entity in ascending score order.
///
/// Stops at the first error returned by `visit` and hands it back unchanged;
/// entities already visited stay visited.
pub fn walk_by_score<'a, I, K, F, E>(assessments_per_entity: I, mut visit: F) -> Result<(), E>
where
    I: IntoIterator<Item = (&'a K, &'a Assessments)>,
    K: AsRef<str> + ?Sized + 'a,
    F: FnMut(&str, &Assessments, u64) -> Result<(), E>,
{
    for (name, assessments, score) in rank_by_score(assessments_per_entity) {
        visit(name, assessments, score)?;
    }
    Ok(())
}
