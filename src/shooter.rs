use crate::shared::{NUM_NOTES, is_sharp};

pub const MAX_SHOTS: usize = 40;
pub const DEFAULT_VELOCITY: f32 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shot {
    pub active: bool,
    pub distance: f32, // travelled since the note was played
    pub note: usize,
}

// Fixed ring of shots. Every new shot takes the next slot, even if the shot
// already there is still flying.
pub struct Shooter {
    shots: [Shot; MAX_SHOTS],
    current: usize, // next slot to write
    velocity: f32,
    rows: [usize; NUM_NOTES],
}

impl Shooter {
    pub fn new(velocity: f32) -> Self {
        Self {
            shots: [Shot::default(); MAX_SHOTS],
            current: 0,
            velocity,
            rows: natural_rows(),
        }
    }

    pub fn shoot(&mut self, note: usize) {
        if note >= NUM_NOTES {
            return;
        }
        self.shots[self.current] = Shot {
            active: true,
            distance: 0.0,
            note,
        };
        self.current = (self.current + 1) % MAX_SHOTS;
    }

    pub fn update(&mut self, dt: f32, range: f32) {
        for shot in self.shots.iter_mut().filter(|s| s.active) {
            shot.distance += self.velocity * dt;
            if shot.distance >= range {
                shot.active = false;
            }
        }
    }

    pub fn active_shots(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter().filter(|s| s.active)
    }

    // vertical slot of a note, sharps share the row of the natural below them
    pub fn row(&self, note: usize) -> usize {
        self.rows[note]
    }

    #[cfg(test)]
    fn slot(&self, i: usize) -> &Shot {
        &self.shots[i]
    }
}

impl Default for Shooter {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY)
    }
}

fn natural_rows() -> [usize; NUM_NOTES] {
    let mut rows = [0; NUM_NOTES];
    let mut count = 0;
    for (note, row) in rows.iter_mut().enumerate() {
        if !is_sharp(note) && note > 0 {
            count += 1;
        }
        *row = count;
    }
    rows
}
