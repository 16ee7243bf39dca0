// The scripted visitor: a single notable touring campus.
//
// State machine, advanced once per tick by `Visitor::step`:
//
//   Walking ──arrive──▶ VisitingBuilding ──timer 0──▶ Walking (next target)
//                                          └─no target─▶ Chatting
//   Chatting ──timer 0──▶ Leaving
//
// Walking moves one tile per tick along the axis with the larger remaining
// delta, x only when |dx| > |dy|, so ties go to y. A visitor spawns at the
// centerpiece with its own tile as the first target and arrives on its
// first step.
//
// When a visit ends, the tile's building type joins the deduplicated visited
// set and the next target is the nearest (Manhattan) tile holding a relevant,
// unvisited building type. The grid is scanned row-major and only a strictly
// closer tile replaces the current best, so the first tile found wins ties.
//
// While chatting, each tick independently rolls for a chat line and a photo.
// `Leaving` is never observed between ticks: `sim.rs` runs the departure
// sequence and drops the visitor on the tick `step` reports `Departing`.

use crate::config::VisitorParams;
use crate::grid::CampusGrid;
use crate::narrative::{ChatLine, NarrativePools, PhotoTemplate};
use crate::types::{BuildingType, GridCoord};
use campus_prng::RandomSource;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitorState {
    Walking,
    VisitingBuilding,
    Chatting,
    Leaving,
}

/// Something that happened during one visitor step.
#[derive(Clone, Debug, PartialEq)]
pub enum VisitorAction {
    Arrived { at: GridCoord },
    /// Done touring relevant buildings; chatting before departure.
    StartedChatting,
    Chat(ChatLine),
    Photo(PhotoTemplate),
    /// Chatting is over. The caller runs the departure sequence.
    Departing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visitor {
    /// Id of the scripted event that spawned this visitor.
    pub event_id: String,
    pub notable: String,
    pub position: GridCoord,
    pub target: GridCoord,
    pub state: VisitorState,
    pub timer: u32,
    pub visited: SmallVec<[BuildingType; 4]>,
    pub chats: u32,
    pub photos: u32,
}

/// Nearest tile whose building is in `relevant` but not in `visited`.
pub fn nearest_target(
    grid: &CampusGrid,
    from: GridCoord,
    relevant: &[BuildingType],
    visited: &[BuildingType],
) -> Option<GridCoord> {
    let mut best: Option<(GridCoord, u32)> = None;
    for (coord, tile) in grid.iter() {
        let Some(building) = tile.building else {
            continue;
        };
        if !relevant.contains(&building) || visited.contains(&building) {
            continue;
        }
        let dist = from.manhattan_distance(coord);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((coord, dist));
        }
    }
    best.map(|(coord, _)| coord)
}

impl Visitor {
    pub fn spawn(event_id: &str, notable: &str, at: GridCoord) -> Self {
        Self {
            event_id: event_id.to_string(),
            notable: notable.to_string(),
            position: at,
            target: at,
            state: VisitorState::Walking,
            timer: 0,
            visited: SmallVec::new(),
            chats: 0,
            photos: 0,
        }
    }

    /// Advance one tick.
    pub fn step<R: RandomSource>(
        &mut self,
        grid: &CampusGrid,
        relevant: &[BuildingType],
        params: &VisitorParams,
        pools: &NarrativePools,
        rng: &mut R,
    ) -> SmallVec<[VisitorAction; 2]> {
        let mut actions = SmallVec::new();
        match self.state {
            VisitorState::Walking => {
                self.walk();
                if self.position == self.target {
                    self.state = VisitorState::VisitingBuilding;
                    self.timer = params.visit_ticks;
                    actions.push(VisitorAction::Arrived { at: self.position });
                }
            }
            VisitorState::VisitingBuilding => {
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    if let Some(building) = grid.building_at(self.position) {
                        if !self.visited.contains(&building) {
                            self.visited.push(building);
                        }
                    }
                    match nearest_target(grid, self.position, relevant, &self.visited) {
                        Some(next) => {
                            self.state = VisitorState::Walking;
                            self.target = next;
                        }
                        None => {
                            self.state = VisitorState::Chatting;
                            self.timer = params.chat_ticks;
                            actions.push(VisitorAction::StartedChatting);
                        }
                    }
                }
            }
            VisitorState::Chatting => {
                let here = grid.building_at(self.position);
                if rng.random_bool(params.chat_chance) {
                    self.chats += 1;
                    if let Some(line) = pools.chat(&self.notable, here, rng) {
                        actions.push(VisitorAction::Chat(line));
                    }
                }
                if rng.random_bool(params.photo_chance) {
                    self.photos += 1;
                    if let Some(photo) = pools.photo(&self.notable, here, rng) {
                        actions.push(VisitorAction::Photo(photo));
                    }
                }
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.state = VisitorState::Leaving;
                    actions.push(VisitorAction::Departing);
                }
            }
            VisitorState::Leaving => {}
        }
        actions
    }

    fn walk(&mut self) {
        let dx = self.target.x - self.position.x;
        let dy = self.target.y - self.position.y;
        if dx.abs() > dy.abs() {
            self.position.x += dx.signum();
        } else if dy != 0 {
            self.position.y += dy.signum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;
    use crate::types::Orientation;
    use campus_prng::FixedSource;

    fn place(grid: &mut CampusGrid, x: i32, y: i32, building: BuildingType) {
        grid.set(
            GridCoord::new(x, y),
            Tile {
                building: Some(building),
                variant: 0,
                orientation: Orientation::default(),
            },
        );
    }

    fn step(v: &mut Visitor, grid: &CampusGrid, relevant: &[BuildingType]) -> Vec<VisitorAction> {
        v.step(
            grid,
            relevant,
            &VisitorParams::default(),
            &NarrativePools::standard(),
            &mut FixedSource::never(),
        )
        .into_vec()
    }

    #[test]
    fn walking_prefers_larger_axis_and_ties_go_to_y() {
        let mut v = Visitor::spawn("e", "Ada", GridCoord::new(0, 0));
        v.target = GridCoord::new(3, 1);
        v.walk();
        assert_eq!(v.position, GridCoord::new(1, 0));
        v.walk();
        assert_eq!(v.position, GridCoord::new(2, 0));
        // |dx| == |dy| == 1: y first.
        v.walk();
        assert_eq!(v.position, GridCoord::new(2, 1));
        v.walk();
        assert_eq!(v.position, GridCoord::new(3, 1));
    }

    #[test]
    fn spawn_arrives_on_first_step() {
        let grid = CampusGrid::new(5);
        let mut v = Visitor::spawn("e", "Ada", GridCoord::new(2, 2));
        let actions = step(&mut v, &grid, &[]);
        assert_eq!(actions, vec![VisitorAction::Arrived { at: GridCoord::new(2, 2) }]);
        assert_eq!(v.state, VisitorState::VisitingBuilding);
        assert_eq!(v.timer, 3);
    }

    #[test]
    fn nearest_target_ties_go_to_first_in_row_major_order() {
        let mut grid = CampusGrid::new(5);
        place(&mut grid, 4, 2, BuildingType::LectureHall);
        place(&mut grid, 2, 0, BuildingType::LectureHall);
        place(&mut grid, 0, 2, BuildingType::LectureHall);
        let from = GridCoord::new(2, 2);
        assert_eq!(
            nearest_target(&grid, from, &[BuildingType::LectureHall], &[]),
            Some(GridCoord::new(2, 0))
        );
        assert_eq!(
            nearest_target(&grid, from, &[BuildingType::LectureHall], &[BuildingType::LectureHall]),
            None
        );
    }

    #[test]
    fn full_tour_then_chat_then_depart() {
        let mut grid = CampusGrid::new(6);
        place(&mut grid, 2, 2, BuildingType::MemorialChurch);
        place(&mut grid, 2, 4, BuildingType::EngineeringQuad);
        let relevant = [BuildingType::EngineeringQuad];
        let mut v = Visitor::spawn("e", "Ada", GridCoord::new(2, 2));

        step(&mut v, &grid, &relevant); // arrive at spawn
        step(&mut v, &grid, &relevant);
        step(&mut v, &grid, &relevant);
        step(&mut v, &grid, &relevant); // visit over, head to the quad
        assert_eq!(v.state, VisitorState::Walking);
        assert_eq!(v.target, GridCoord::new(2, 4));
        assert_eq!(v.visited.as_slice(), &[BuildingType::MemorialChurch]);

        step(&mut v, &grid, &relevant);
        let actions = step(&mut v, &grid, &relevant);
        assert_eq!(actions, vec![VisitorAction::Arrived { at: GridCoord::new(2, 4) }]);

        step(&mut v, &grid, &relevant);
        step(&mut v, &grid, &relevant);
        let actions = step(&mut v, &grid, &relevant);
        assert_eq!(actions, vec![VisitorAction::StartedChatting]);
        assert_eq!(v.state, VisitorState::Chatting);
        assert_eq!(
            v.visited.as_slice(),
            &[BuildingType::MemorialChurch, BuildingType::EngineeringQuad]
        );

        // FixedSource::never() fails every chat and photo roll.
        for _ in 0..4 {
            assert!(step(&mut v, &grid, &relevant).is_empty());
        }
        let actions = step(&mut v, &grid, &relevant);
        assert_eq!(actions, vec![VisitorAction::Departing]);
        assert_eq!(v.state, VisitorState::Leaving);
        assert_eq!((v.chats, v.photos), (0, 0));
    }

    #[test]
    fn chatting_with_every_roll_succeeding() {
        let grid = CampusGrid::new(3);
        let mut v = Visitor::spawn("e", "Ada", GridCoord::new(1, 1));
        v.state = VisitorState::Chatting;
        v.timer = 2;
        let actions = v.step(
            &grid,
            &[],
            &VisitorParams::default(),
            &NarrativePools::standard(),
            &mut FixedSource::always(),
        );
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], VisitorAction::Chat(_)));
        assert!(matches!(actions[1], VisitorAction::Photo(_)));
        assert_eq!((v.chats, v.photos, v.timer), (1, 1, 1));
    }
}
