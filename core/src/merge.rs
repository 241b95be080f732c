use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Coordinated merge over the posting lists of the queried skills.
///
/// Every list is sorted by candidate id, so a cursor per list plus a min-heap
/// over the cursor fronts yields candidate ids in ascending order. When an id
/// is popped, the number of lists fronting it is exactly the number of queried
/// skills that candidate holds: a cursor only moves past an id once that id
/// has been fully credited, so no list can still owe it a point. The whole
/// pass is linear in the combined length of the participating lists and never
/// touches candidates holding none of the queried skills.
pub struct MultiSkillIter<'a> {
    lists: Vec<&'a [String]>,
    cursors: Vec<usize>,
    // min-heap of (front id, list index) across all non-exhausted lists
    frontier: BinaryHeap<Reverse<(&'a str, usize)>>,
}

impl<'a> MultiSkillIter<'a> {
    pub fn new(lists: Vec<&'a [String]>) -> Self {
        let cursors = vec![0; lists.len()];
        let mut frontier = BinaryHeap::with_capacity(lists.len());
        for (i, list) in lists.iter().enumerate() {
            if let Some(first) = list.first() {
                frontier.push(Reverse((first.as_str(), i)));
            }
        }
        MultiSkillIter { lists, cursors, frontier }
    }

    /// Step the cursor of one list, re-seeding the frontier with the next id
    /// unless the list is exhausted.
    fn advance(&mut self, i: usize) {
        self.cursors[i] += 1;
        if let Some(next) = self.lists[i].get(self.cursors[i]) {
            self.frontier.push(Reverse((next.as_str(), i)));
        }
    }
}

impl<'a> Iterator for MultiSkillIter<'a> {
    /// (candidate id, overlap score with the queried skill set)
    type Item = (&'a str, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let Reverse((id, i)) = self.frontier.pop()?;
        let mut score = 1;
        self.advance(i);
        while let Some(&Reverse((front, j))) = self.frontier.peek() {
            if front != id {
                break;
            }
            self.frontier.pop();
            score += 1;
            self.advance(j);
        }
        Some((id, score))
    }
}
