//! Train-versus-train encounters: merging and mutual repainting.

use glam::IVec2;
use switchyard_core::{BlendError, Event};

use crate::train::Train;

const HIT_BOX: i32 = 2;

/// Reports whether the hit boxes of two trains overlap.
pub(crate) fn overlapping(first: IVec2, second: IVec2) -> bool {
    let delta = (first - second).abs();
    delta.x < HIT_BOX && delta.y < HIT_BOX
}

/// Resolves every overlapping pair of live trains.
///
/// Pairs are visited in arena order (`i < j`). Trains travelling the same
/// way merge into the earlier one; trains crossing each other both take the
/// blended color. Absorbed trains are removed before returning, even when a
/// blend fails part way through.
pub(crate) fn resolve(
    trains: &mut Vec<Train>,
    out_events: &mut Vec<Event>,
) -> Result<(), BlendError> {
    let mut absorbed = vec![false; trains.len()];
    let outcome = resolve_pairs(trains, &mut absorbed, out_events);

    let mut flags = absorbed.into_iter();
    trains.retain(|_| !flags.next().unwrap_or(false));
    outcome
}

fn resolve_pairs(
    trains: &mut [Train],
    absorbed: &mut [bool],
    out_events: &mut Vec<Event>,
) -> Result<(), BlendError> {
    for j in 1..trains.len() {
        for i in 0..j {
            if absorbed[i] || absorbed[j] {
                continue;
            }

            let (head, tail) = trains.split_at_mut(j);
            let first = &mut head[i];
            let second = &mut tail[0];
            if first.is_crashed() || second.is_crashed() {
                continue;
            }
            if !overlapping(first.position, second.position) {
                continue;
            }

            let color = first.color.blend(second.color)?;
            if first.direction == second.direction {
                first.color = color;
                absorbed[j] = true;
                out_events.push(Event::TrainsMerged {
                    survivor: first.id,
                    absorbed: second.id,
                    color,
                });
            } else {
                let changed = first.color != color || second.color != color;
                first.color = color;
                second.color = color;
                if changed {
                    out_events.push(Event::TrainsPainted {
                        first: first.id,
                        second: second.id,
                        color,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::TrackSegment;
    use switchyard_core::{CellCoord, Direction, TrackType, TrainColor, TrainId};

    fn train(id: u32, track: TrackType, reversed: bool, color: TrainColor) -> Train {
        let cell = CellCoord::new(3, 3);
        let mut train = Train::on_track(
            TrainId::new(id),
            TrackSegment::drawn(cell, track),
            reversed,
            color,
        );
        for _ in 0..16 {
            train.advance();
        }
        train
    }

    #[test]
    fn same_direction_trains_merge_into_one() {
        let mut trains = vec![
            train(1, TrackType::Hori, false, TrainColor::Blue),
            train(2, TrackType::Hori, false, TrainColor::Red),
        ];
        let mut events = Vec::new();
        resolve(&mut trains, &mut events).expect("blend is defined");

        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].id, TrainId::new(1));
        assert_eq!(trains[0].color, TrainColor::Purple);
        assert_eq!(
            events,
            vec![Event::TrainsMerged {
                survivor: TrainId::new(1),
                absorbed: TrainId::new(2),
                color: TrainColor::Purple,
            }]
        );
    }

    #[test]
    fn crossing_trains_paint_each_other() {
        let mut trains = vec![
            train(1, TrackType::Hori, false, TrainColor::Blue),
            train(2, TrackType::Vert, false, TrainColor::Red),
        ];
        assert_eq!(trains[0].direction, Direction::Right);
        assert_eq!(trains[1].direction, Direction::Down);
        let mut events = Vec::new();
        resolve(&mut trains, &mut events).expect("blend is defined");

        assert_eq!(trains.len(), 2);
        assert!(trains.iter().all(|train| train.color == TrainColor::Purple));
        assert_eq!(events.len(), 1);

        events.clear();
        resolve(&mut trains, &mut events).expect("blend is defined");
        assert!(events.is_empty(), "unchanged colors stay silent");
    }

    #[test]
    fn distant_trains_are_untouched() {
        let mut trains = vec![
            train(1, TrackType::Hori, false, TrainColor::Blue),
            train(2, TrackType::Hori, true, TrainColor::Red),
        ];
        trains[1].advance();
        trains[1].advance();
        let mut events = Vec::new();
        resolve(&mut trains, &mut events).expect("no encounter");
        assert!(events.is_empty());
        assert_eq!(trains[0].color, TrainColor::Blue);
    }

    #[test]
    fn undefined_blend_is_reported() {
        let mut trains = vec![
            train(1, TrackType::Hori, false, TrainColor::Green),
            train(2, TrackType::Hori, false, TrainColor::Red),
        ];
        let mut events = Vec::new();
        let error = resolve(&mut trains, &mut events).expect_err("green and red do not mix");
        assert_eq!(error.first, TrainColor::Green);
        assert_eq!(trains.len(), 2);
    }

    #[test]
    fn hit_boxes_overlap_within_one_unit() {
        assert!(overlapping(IVec2::new(10, 10), IVec2::new(11, 9)));
        assert!(!overlapping(IVec2::new(10, 10), IVec2::new(12, 10)));
    }
}
