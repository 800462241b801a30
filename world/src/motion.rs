//! Tile-to-tile interpolation and animation state machine shared by every
//! mobile entity.
//!
//! The logical tile is authoritative: moves commit the destination tile
//! immediately and the pixel position then converges toward it at a fixed
//! speed per frame. Animation advances once per frame regardless of
//! wall-clock time.

use glam::Vec2;
use roguelike_core::{
    Actor, AnimState, DistanceMetric, Facing, MotionProfile, SpriteFrame, SpriteSet, TilePosition,
};

/// Position, interpolation and animation state of a hero or enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct MobileEntity {
    tile: TilePosition,
    pixel: Vec2,
    tile_size: f32,
    moving: bool,
    facing: Facing,
    anim_state: AnimState,
    anim_frame: usize,
    anim_timer: f32,
    profile: MotionProfile,
}

impl MobileEntity {
    /// Creates an idle entity resting on the provided tile.
    #[must_use]
    pub fn new(tile: TilePosition, tile_size: f32, profile: MotionProfile) -> Self {
        Self {
            tile,
            pixel: tile_origin(tile, tile_size),
            tile_size,
            moving: false,
            facing: Facing::Right,
            anim_state: AnimState::Idle,
            anim_frame: 0,
            anim_timer: 0.0,
            profile,
        }
    }

    /// Tile the entity logically occupies.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.tile
    }

    /// Interpolated pixel position of the entity's top-left corner.
    #[must_use]
    pub const fn pixel(&self) -> Vec2 {
        self.pixel
    }

    /// Pixel position the entity converges toward.
    #[must_use]
    pub fn target_pixel(&self) -> Vec2 {
        tile_origin(self.tile, self.tile_size)
    }

    /// Whether the entity is still travelling toward its tile.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Last horizontal direction of travel.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Animation channel currently playing.
    #[must_use]
    pub const fn anim_state(&self) -> AnimState {
        self.anim_state
    }

    /// Frame index within the active animation channel.
    #[must_use]
    pub const fn anim_frame(&self) -> usize {
        self.anim_frame
    }

    /// Fractional progress toward the next animation frame, in `[0, 1)`.
    #[must_use]
    pub const fn anim_timer(&self) -> f32 {
        self.anim_timer
    }

    /// Remaining distance to the target under the entity's metric.
    #[must_use]
    pub fn distance_to_target(&self) -> f32 {
        let delta = self.target_pixel() - self.pixel;
        match self.profile.metric {
            DistanceMetric::Euclidean => delta.length(),
            DistanceMetric::HorizontalOnly => delta.x.abs(),
        }
    }

    /// Decorative vertical bob in whole pixels, zero unless idle.
    #[must_use]
    pub fn idle_offset(&self) -> f32 {
        if self.anim_state != AnimState::Idle {
            return 0.0;
        }
        ((self.anim_timer * self.profile.bob_frequency).sin() * self.profile.bob_amplitude).round()
    }

    /// Pixel position a renderer should draw at, including the idle bob.
    #[must_use]
    pub fn render_position(&self) -> Vec2 {
        self.pixel + Vec2::new(0.0, self.idle_offset())
    }

    /// Sprite frame to draw for the provided actor kind.
    #[must_use]
    pub const fn sprite(&self, actor: Actor) -> SpriteFrame {
        SpriteFrame {
            set: SpriteSet::new(actor, self.anim_state, self.facing),
            frame: self.anim_frame,
        }
    }

    /// Commits the entity to a new tile and starts interpolating toward it.
    ///
    /// Horizontal moves update the facing; vertical moves keep it.
    pub(crate) fn begin_move(&mut self, to: TilePosition) {
        if to.x() < self.tile.x() {
            self.facing = Facing::Left;
        } else if to.x() > self.tile.x() {
            self.facing = Facing::Right;
        }
        self.tile = to;
        self.moving = self.pixel != self.target_pixel();
    }

    /// Advances animation and interpolation by one frame.
    ///
    /// Returns `true` when the entity reached its tile during this frame.
    pub(crate) fn update(&mut self) -> bool {
        let target_state = if self.moving {
            AnimState::Walk
        } else {
            AnimState::Idle
        };
        if target_state != self.anim_state {
            self.anim_state = target_state;
            self.anim_frame = 0;
        }

        let (anim_speed, frame_count) = match self.anim_state {
            AnimState::Idle => (self.profile.idle_anim_speed, self.profile.idle_frames),
            AnimState::Walk => (self.profile.walk_anim_speed, self.profile.walk_frames),
        };
        self.anim_timer += anim_speed;
        if self.anim_timer >= 1.0 {
            self.anim_timer -= 1.0;
            self.anim_frame = (self.anim_frame + 1) % frame_count.max(1);
        }

        if !self.moving {
            return false;
        }

        let target = self.target_pixel();
        let distance = self.distance_to_target();
        if distance <= self.profile.speed {
            self.pixel = target;
            self.moving = false;
            return true;
        }

        let delta = target - self.pixel;
        let step = match self.profile.metric {
            DistanceMetric::Euclidean => delta * (self.profile.speed / distance),
            DistanceMetric::HorizontalOnly => Vec2::new(delta.x.signum() * self.profile.speed, 0.0),
        };
        self.pixel += step;
        false
    }
}

fn tile_origin(tile: TilePosition, tile_size: f32) -> Vec2 {
    Vec2::new(tile.x() as f32 * tile_size, tile.y() as f32 * tile_size)
}
