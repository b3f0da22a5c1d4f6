//! Slicing an ordered participant list into planned groups

use super::plan::GroupSizePlan;

/// Split `items` into consecutive groups following the size plan for its
/// length.
///
/// Order is preserved: concatenating the result yields `items` again. A
/// planned size of zero produces no group, so empty input gives an empty
/// result rather than one empty group.
pub fn allocate<T>(items: Vec<T>) -> Vec<Vec<T>> {
    let plan = GroupSizePlan::for_count(items.len());
    let mut groups = Vec::with_capacity(plan.group_count());
    let mut rest = items.into_iter();

    for &size in plan.sizes() {
        if size == 0 {
            continue;
        }
        groups.push(rest.by_ref().take(size).collect());
    }

    debug_assert!(rest.next().is_none(), "plan must consume every participant");
    groups
}
