//! Greedy group partitioning.

use core::str::FromStr;

use lexis_types::{ConfigError, RosterError};
use smallvec::SmallVec;
use tracing::debug;

/// A request for `count` groups of `size` members each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRequest {
    /// Members per group.
    pub size: usize,
    /// Number of groups.
    pub count: usize,
}

/// Ordered list of group requests.
///
/// Groups are cut in request order, so `3x3,4x2` yields three 3-member
/// groups followed by two 4-member groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPlan {
    requests: SmallVec<[GroupRequest; 2]>,
}

impl GroupPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classroom default: `threes` 3-member groups, then `fours` 4-member groups.
    pub fn threes_and_fours(threes: usize, fours: usize) -> Self {
        Self::new().with(3, threes).with(4, fours)
    }

    /// Appends a request. Zero-sized or zero-count requests are ignored.
    #[must_use]
    pub fn with(mut self, size: usize, count: usize) -> Self {
        if size > 0 && count > 0 {
            self.requests.push(GroupRequest { size, count });
        }
        self
    }

    /// The requests in cut order.
    pub fn requests(&self) -> &[GroupRequest] {
        &self.requests
    }

    /// Total members the plan needs, saturating at `usize::MAX`.
    pub fn required(&self) -> usize {
        self.requests
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.size.saturating_mul(r.count)))
    }

    /// Total number of groups the plan produces, saturating at `usize::MAX`.
    pub fn group_count(&self) -> usize {
        self.requests
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.count))
    }
}

impl FromStr for GroupPlan {
    type Err = ConfigError;

    /// Parses `SIZExCOUNT` items separated by commas, e.g. `"3x3,4x2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidGroupSpec(s.to_owned());
        let mut plan = GroupPlan::new();

        for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let (size, count) = item
                .split_once(['x', 'X', '*'])
                .ok_or_else(invalid)?;
            let size: usize = size.trim().parse().map_err(|_| invalid())?;
            let count: usize = count.trim().parse().map_err(|_| invalid())?;
            if size == 0 || size.checked_mul(count).is_none() {
                return Err(invalid());
            }
            plan = plan.with(size, count);
        }

        Ok(plan)
    }
}

/// A numbered group of members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// 1-based group number.
    pub number: usize,
    /// Member names, in cut order.
    pub members: SmallVec<[String; 4]>,
}

impl Group {
    /// Display label, e.g. `"Group 3"`.
    pub fn label(&self) -> String {
        format!("Group {}", self.number)
    }
}

/// Cuts `names` into groups according to `plan`.
///
/// Members are taken from the front of `names` in order; shuffle first for
/// random groups. Members beyond what the plan needs are left unplaced.
///
/// # Errors
///
/// Returns `RosterError::NotEnoughMembers` if the plan needs more members
/// than `names` holds.
pub fn partition<S: AsRef<str>>(
    names: &[S],
    plan: &GroupPlan,
) -> Result<Vec<Group>, RosterError> {
    // A saturated total always exceeds `names.len()`, so every cut below is in bounds.
    let requested = plan.required();
    if requested > names.len() {
        return Err(RosterError::NotEnoughMembers {
            requested,
            available: names.len(),
        });
    }

    let mut groups = Vec::with_capacity(plan.group_count());
    let mut rest = names;

    for req in plan.requests() {
        for _ in 0..req.count {
            let (members, tail) = rest.split_at(req.size);
            groups.push(Group {
                number: groups.len() + 1,
                members: members.iter().map(|m| m.as_ref().to_owned()).collect(),
            });
            rest = tail;
        }
    }

    debug!(
        groups = groups.len(),
        placed = requested,
        unplaced = rest.len(),
        "partitioned roster"
    );
    Ok(groups)
}
