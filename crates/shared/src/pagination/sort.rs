//! # 候補列のソート
//!
//! カーソルの再開位置は ID の線形探索で決まるため、候補列は呼び出しごとに
//! 同じ順序で並んでいる必要がある。[`sort_candidates`] はソートキーが同値の
//! アイテムを ID の昇順で並べ、全順序を保証する。

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SortOrder {
    /// 昇順
    Asc,
    /// 降順（新しい順の一覧が多いためデフォルト）
    #[default]
    Desc,
}

/// 候補列をソートキー → ID の順で並べ替える
///
/// ソート方向はソートキーにのみ適用し、タイブレークの ID は常に昇順とする。
///
/// ```
/// use showcase_shared::{SortOrder, sort_candidates};
///
/// let mut items = vec![("b", 1), ("a", 2), ("c", 1)];
/// sort_candidates(&mut items, SortOrder::Desc, |i| i.1, |i| i.0.to_string());
/// assert_eq!(items, vec![("a", 2), ("b", 1), ("c", 1)]);
/// ```
pub fn sort_candidates<T, K, FK, FI>(items: &mut [T], order: SortOrder, key_of: FK, id_of: FI)
where
    K: Ord,
    FK: Fn(&T) -> K,
    FI: Fn(&T) -> String,
{
    items.sort_by(|a, b| {
        let by_key = key_of(a).cmp(&key_of(b));
        let by_key = match order {
            SortOrder::Asc => by_key,
            SortOrder::Desc => by_key.reverse(),
        };
        match by_key {
            Ordering::Equal => id_of(a).cmp(&id_of(b)),
            other => other,
        }
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Event {
        id:          &'static str,
        received_at: i64,
    }

    fn events() -> Vec<Event> {
        vec![
            Event { id: "c", received_at: 10 },
            Event { id: "a", received_at: 30 },
            Event { id: "b", received_at: 10 },
            Event { id: "d", received_at: 20 },
        ]
    }

    fn ids(items: &[Event]) -> Vec<&'static str> {
        items.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_昇順ではソートキーの小さい順に並ぶ() {
        let mut items = events();
        sort_candidates(&mut items, SortOrder::Asc, |e| e.received_at, |e| e.id.to_string());

        assert_eq!(ids(&items), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_降順ではソートキーの大きい順に並ぶ() {
        let mut items = events();
        sort_candidates(&mut items, SortOrder::Desc, |e| e.received_at, |e| e.id.to_string());

        assert_eq!(ids(&items), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_同値のソートキーはidの昇順でタイブレークする() {
        let mut forward = events();
        let mut reversed: Vec<Event> = events().into_iter().rev().collect();

        sort_candidates(&mut forward, SortOrder::Desc, |e| e.received_at, |e| e.id.to_string());
        sort_candidates(&mut reversed, SortOrder::Desc, |e| e.received_at, |e| e.id.to_string());

        // 入力順に関係なく同じ順序になる
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_デフォルトのソート方向は降順() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_ソート方向は小文字でシリアライズされる() {
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), "asc");
        assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), "desc");
    }
}
