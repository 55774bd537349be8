// Lane packing
// Greedy interval packing shared by the timed grid and the banner row

/// An item that occupies the half-open range `[start, end)`.
pub trait Span {
    type Point: Ord + Copy;

    fn start(&self) -> Self::Point;
    fn end(&self) -> Self::Point;
    /// Final sort key for items with identical ranges
    fn tiebreak(&self) -> &str;

    fn overlaps(&self, other: &Self) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

/// Outcome of a packing pass. Indices refer to the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lanes {
    /// Lane assigned to each input item
    pub lane_of: Vec<usize>,
    /// Input indices in placement order
    pub order: Vec<usize>,
    /// Members of each lane, in placement order
    pub members: Vec<Vec<usize>>,
}

impl Lanes {
    pub fn lane_count(&self) -> usize {
        self.members.len()
    }
}

/// Assign every item to the lowest lane holding nothing it overlaps.
///
/// Items are placed by start ascending, then longest first (later end), then
/// by tiebreak, so the result does not depend on input order and long
/// events settle into lane 0.
pub fn assign_lanes<S: Span>(items: &[S]) -> Lanes {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&items[a], &items[b]);
        a.start()
            .cmp(&b.start())
            .then_with(|| b.end().cmp(&a.end()))
            .then_with(|| a.tiebreak().cmp(b.tiebreak()))
    });

    let mut lane_of = vec![0; items.len()];
    let mut members: Vec<Vec<usize>> = Vec::new();

    for &index in &order {
        let item = &items[index];
        let free = members
            .iter()
            .position(|lane| lane.iter().all(|&placed| !items[placed].overlaps(item)));

        let lane = match free {
            Some(lane) => lane,
            None => {
                members.push(Vec::new());
                members.len() - 1
            }
        };
        members[lane].push(index);
        lane_of[index] = lane;
    }

    Lanes {
        lane_of,
        order,
        members,
    }
}
