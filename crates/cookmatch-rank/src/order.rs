use std::cmp::Ordering;
use tracing::debug;

use cookmatch_core::{Candidate, Hit, NumericField, QueryDescriptor, SortKey};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Asc,
    Desc,
}

/// Present values ordered by `direction`; absent values always after them.
fn nulls_last(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Asc => a.total_cmp(&b),
            Direction::Desc => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_numeric<C: Candidate>(a: &Hit<'_, C>, b: &Hit<'_, C>, field: NumericField, direction: Direction) -> Ordering {
    nulls_last(a.record.numeric(field), b.record.numeric(field), direction)
}

/// Primary-key comparison for `key`. `Equal` leaves input order to the stable sort.
pub fn compare<C: Candidate>(key: SortKey, a: &Hit<'_, C>, b: &Hit<'_, C>) -> Ordering {
    match key {
        SortKey::RelevanceDesc => Ordering::Equal,
        SortKey::PriceAsc => by_numeric(a, b, NumericField::Price, Direction::Asc),
        SortKey::PriceDesc => by_numeric(a, b, NumericField::Price, Direction::Desc),
        SortKey::RatingDesc => by_numeric(a, b, NumericField::Rating, Direction::Desc),
        SortKey::ReviewsDesc => by_numeric(a, b, NumericField::ReviewCount, Direction::Desc),
        SortKey::NameAsc => a.record.display_name().cmp(b.record.display_name()),
        SortKey::Newest => b.record.created_at().cmp(&a.record.created_at()),
        SortKey::DistanceAsc => nulls_last(a.distance, b.distance, Direction::Asc),
    }
}

/// Order `hits` by the query's sort key.
///
/// `relevance-desc` keeps the incoming order, and so does `distance-asc` when
/// the query carried no geo filter.
pub fn rank<'a, C: Candidate>(query: &QueryDescriptor, mut hits: Vec<Hit<'a, C>>) -> Vec<Hit<'a, C>> {
    let key = query.sort();
    let no_op = match key {
        SortKey::RelevanceDesc => true,
        SortKey::DistanceAsc => query.geo().is_none(),
        _ => false,
    };
    if !no_op {
        hits.sort_by(|a, b| compare(key, a, b));
    }
    debug!(sort = %key, hits = hits.len(), reordered = !no_op, "ranked");
    hits
}
