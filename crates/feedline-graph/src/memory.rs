//! In-memory follow graph.
//!
//! [`InMemoryFollowGraph`] keeps forward (`following`) and reverse
//! (`followers`) adjacency sets behind a single `RwLock`, so both directions
//! always change together and every mutation is atomic.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use feedline_types::{FollowEdge, UserId};

use crate::error::{GraphError, GraphResult};
use crate::traits::FollowGraph;

/// An in-memory implementation of [`FollowGraph`].
#[derive(Debug, Default)]
pub struct InMemoryFollowGraph {
    inner: RwLock<Adjacency>,
}

#[derive(Debug, Default)]
struct Adjacency {
    following: BTreeMap<UserId, BTreeSet<UserId>>,
    followers: BTreeMap<UserId, BTreeSet<UserId>>,
    edges: usize,
}

impl Adjacency {
    fn contains(&self, follower: UserId, followed: UserId) -> bool {
        self.following
            .get(&follower)
            .is_some_and(|set| set.contains(&followed))
    }
}

/// Remove `value` from the set at `key`, dropping the set once empty.
fn remove_from(map: &mut BTreeMap<UserId, BTreeSet<UserId>>, key: UserId, value: UserId) -> bool {
    let Some(set) = map.get_mut(&key) else {
        return false;
    };
    let removed = set.remove(&value);
    if set.is_empty() {
        map.remove(&key);
    }
    removed
}

impl InMemoryFollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GraphResult<RwLockReadGuard<'_, Adjacency>> {
        self.inner
            .read()
            .map_err(|e| GraphError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> GraphResult<RwLockWriteGuard<'_, Adjacency>> {
        self.inner
            .write()
            .map_err(|e| GraphError::Storage(format!("lock poisoned: {e}")))
    }
}

impl FollowGraph for InMemoryFollowGraph {
    fn is_following(&self, follower: UserId, followed: UserId) -> GraphResult<bool> {
        Ok(self.read()?.contains(follower, followed))
    }

    fn follow(&self, follower: UserId, followed: UserId) -> GraphResult<bool> {
        let edge = FollowEdge::new(follower, followed);
        if edge.is_self_loop() {
            return Err(GraphError::SelfFollow(follower));
        }

        let mut adj = self.write()?;
        if adj.contains(follower, followed) {
            return Ok(false);
        }
        adj.following.entry(follower).or_default().insert(followed);
        adj.followers.entry(followed).or_default().insert(follower);
        adj.edges += 1;

        tracing::debug!(edge = %edge, "edge inserted");
        Ok(true)
    }

    fn unfollow(&self, follower: UserId, followed: UserId) -> GraphResult<bool> {
        let mut adj = self.write()?;
        if !remove_from(&mut adj.following, follower, followed) {
            return Ok(false);
        }
        remove_from(&mut adj.followers, followed, follower);
        adj.edges -= 1;

        tracing::debug!(edge = %FollowEdge::new(follower, followed), "edge removed");
        Ok(true)
    }

    fn followers_of(&self, user: UserId) -> GraphResult<BTreeSet<UserId>> {
        Ok(self.read()?.followers.get(&user).cloned().unwrap_or_default())
    }

    fn following_of(&self, user: UserId) -> GraphResult<BTreeSet<UserId>> {
        Ok(self.read()?.following.get(&user).cloned().unwrap_or_default())
    }

    fn edge_count(&self) -> GraphResult<usize> {
        Ok(self.read()?.edges)
    }

    fn follower_count(&self, user: UserId) -> GraphResult<usize> {
        Ok(self.read()?.followers.get(&user).map_or(0, BTreeSet::len))
    }

    fn following_count(&self, user: UserId) -> GraphResult<usize> {
        Ok(self.read()?.following.get(&user).map_or(0, BTreeSet::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn u(n: u64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn follow_then_unfollow_round_trip() {
        let graph = InMemoryFollowGraph::new();
        assert!(!graph.is_following(u(1), u(2)).unwrap());

        assert!(graph.follow(u(1), u(2)).unwrap());
        assert!(graph.is_following(u(1), u(2)).unwrap());
        assert!(!graph.is_following(u(2), u(1)).unwrap());

        assert!(graph.unfollow(u(1), u(2)).unwrap());
        assert!(!graph.is_following(u(1), u(2)).unwrap());
        assert_eq!(graph.edge_count().unwrap(), 0);
    }

    #[test]
    fn follow_is_idempotent() {
        let graph = InMemoryFollowGraph::new();
        assert!(graph.follow(u(1), u(2)).unwrap());
        assert!(!graph.follow(u(1), u(2)).unwrap());
        assert_eq!(graph.edge_count().unwrap(), 1);
        assert_eq!(graph.followers_of(u(2)).unwrap(), BTreeSet::from([u(1)]));
    }

    #[test]
    fn unfollow_without_edge_is_noop() {
        let graph = InMemoryFollowGraph::new();
        graph.follow(u(1), u(3)).unwrap();
        assert!(!graph.unfollow(u(1), u(2)).unwrap());
        assert!(!graph.unfollow(u(9), u(1)).unwrap());
        assert_eq!(graph.edge_count().unwrap(), 1);
    }

    #[test]
    fn self_follow_rejected() {
        let graph = InMemoryFollowGraph::new();
        assert_eq!(graph.follow(u(5), u(5)).unwrap_err(), GraphError::SelfFollow(u(5)));
        assert_eq!(graph.edge_count().unwrap(), 0);
        assert!(!graph.is_following(u(5), u(5)).unwrap());
    }

    #[test]
    fn followers_and_following_are_mirrors() {
        let graph = InMemoryFollowGraph::new();
        graph.follow(u(1), u(3)).unwrap();
        graph.follow(u(2), u(3)).unwrap();
        graph.follow(u(3), u(1)).unwrap();

        assert_eq!(graph.followers_of(u(3)).unwrap(), BTreeSet::from([u(1), u(2)]));
        assert_eq!(graph.following_of(u(3)).unwrap(), BTreeSet::from([u(1)]));
        assert_eq!(graph.following_of(u(1)).unwrap(), BTreeSet::from([u(3)]));
        assert!(graph.followers_of(u(2)).unwrap().is_empty());

        assert_eq!(graph.follower_count(u(3)).unwrap(), 2);
        assert_eq!(graph.following_count(u(2)).unwrap(), 1);
        assert_eq!(graph.following_count(u(42)).unwrap(), 0);
    }

    #[test]
    fn concurrent_identical_follows_insert_once() {
        let graph = Arc::new(InMemoryFollowGraph::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let graph = Arc::clone(&graph);
                std::thread::spawn(move || graph.follow(u(1), u(2)).unwrap())
            })
            .collect();
        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();
        assert_eq!(inserted, 1);
        assert_eq!(graph.edge_count().unwrap(), 1);
    }

    proptest! {
        #[test]
        fn graph_matches_edge_set_model(ops in proptest::collection::vec((any::<bool>(), 1u64..6, 1u64..6), 0..60)) {
            let graph = InMemoryFollowGraph::new();
            let mut model = BTreeSet::new();

            for (is_follow, a, b) in ops {
                if is_follow {
                    match graph.follow(u(a), u(b)) {
                        Ok(inserted) => prop_assert_eq!(inserted, model.insert((a, b))),
                        Err(GraphError::SelfFollow(_)) => prop_assert_eq!(a, b),
                        Err(other) => prop_assert!(false, "unexpected error: {}", other),
                    }
                } else {
                    prop_assert_eq!(graph.unfollow(u(a), u(b)).unwrap(), model.remove(&(a, b)));
                }
            }

            prop_assert_eq!(graph.edge_count().unwrap(), model.len());
            for a in 1u64..6 {
                let following: BTreeSet<UserId> = model.iter().filter(|(f, _)| *f == a).map(|(_, t)| u(*t)).collect();
                let followers: BTreeSet<UserId> = model.iter().filter(|(_, t)| *t == a).map(|(f, _)| u(*f)).collect();
                prop_assert_eq!(graph.following_of(u(a)).unwrap(), following);
                prop_assert_eq!(graph.followers_of(u(a)).unwrap(), followers);
            }
        }
    }
}
