//! Flat request layout for hosts that hand tween commands over as a float buffer
//! (e.g. a SharedArrayBuffer written from JS). Must stay in sync with the writer.
//!
//! Layout per record (all values f32 / 4 bytes):
//! ```text
//! [kind, entity, duration, target.x, target.y, target.z,
//!  easing, loop_mode, loop_count, delay,
//!  has_start, start.x, start.y, start.z, pad, pad]
//! ```
//!
//! Codes are stored as floats; entity ids above 2^24 do not survive the trip.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::error::{Result, TweenError};
use crate::api::types::EntityId;
use crate::extensions::builder::TweenBuilder;
use crate::extensions::easing::Easing;
use crate::extensions::loop_policy::LoopMode;
use crate::input::queue::{TweenCommand, TweenRequest};

/// Floats per request record (wire format — never changes).
pub const REQUEST_FLOATS: usize = 16;

/// Record kind codes.
pub const KIND_ACTIVATE: f32 = 1.0;
pub const KIND_CANCEL: f32 = 2.0;

/// One request as laid out on the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RequestRecord {
    pub kind: f32,
    pub entity: f32,
    pub duration: f32,
    pub target: [f32; 3],
    pub easing: f32,
    pub loop_mode: f32,
    pub loop_count: f32,
    pub delay: f32,
    pub has_start: f32,
    pub start: [f32; 3],
    pub _pad: [f32; 2],
}

impl RequestRecord {
    pub const FLOATS: usize = REQUEST_FLOATS;

    /// Encode an activation request.
    pub fn activate(request: &TweenRequest<Vec3>) -> Self {
        let builder = &request.builder;
        let start = builder.start();
        Self {
            kind: KIND_ACTIVATE,
            entity: request.entity.0 as f32,
            duration: builder.duration(),
            target: builder.target().to_array(),
            easing: builder.easing().code() as f32,
            loop_mode: builder.loop_mode().code() as f32,
            loop_count: builder.loop_count() as f32,
            delay: builder.delay(),
            has_start: if start.is_some() { 1.0 } else { 0.0 },
            start: start.unwrap_or(Vec3::ZERO).to_array(),
            _pad: [0.0; 2],
        }
    }

    /// Encode a cancellation.
    pub fn cancel(entity: EntityId) -> Self {
        Self {
            kind: KIND_CANCEL,
            entity: entity.0 as f32,
            ..Self::default()
        }
    }

    /// Decode into a command. Configuration values are not validated here;
    /// that happens when the command is built.
    pub fn to_command(&self) -> Result<TweenCommand<Vec3>> {
        let entity = EntityId(code(self.entity, "entity")?);

        if self.kind == KIND_CANCEL {
            return Ok(TweenCommand::Cancel(entity));
        }
        if self.kind != KIND_ACTIVATE {
            return Err(TweenError::MalformedRequest { field: "kind", value: self.kind });
        }

        let easing = Easing::from_code(code(self.easing, "easing")?)
            .ok_or(TweenError::MalformedRequest { field: "easing", value: self.easing })?;
        let loop_mode = LoopMode::from_code(code(self.loop_mode, "loop_mode")?)
            .ok_or(TweenError::MalformedRequest { field: "loop_mode", value: self.loop_mode })?;

        let mut builder = TweenBuilder::new(self.duration, Vec3::from_array(self.target))
            .with_ease(easing)
            .with_loops(loop_mode, count(self.loop_count)?)
            .with_delay(self.delay);
        if self.has_start != 0.0 {
            builder = builder.with_start_value(Vec3::from_array(self.start));
        }

        Ok(TweenCommand::Activate(TweenRequest::new(entity, builder)))
    }
}

/// A non-negative integral float, as used for codes and ids.
fn code(value: f32, field: &'static str) -> Result<u32> {
    // `u32::MAX as f32` rounds up to 2^32, which is already out of range.
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u32::MAX as f32 {
        Ok(value as u32)
    } else {
        Err(TweenError::MalformedRequest { field, value })
    }
}

/// An integral loop count. Sign is left for the builder to judge.
fn count(value: f32) -> Result<i32> {
    if value.is_finite() && value.fract() == 0.0 && value >= i32::MIN as f32 && value < i32::MAX as f32 {
        Ok(value as i32)
    } else {
        Err(TweenError::MalformedRequest { field: "loop_count", value })
    }
}

/// Decode a buffer of request records. Fails on the first malformed record.
pub fn decode_requests(buffer: &[f32]) -> Result<Vec<TweenCommand<Vec3>>> {
    let records: &[RequestRecord] = bytemuck::try_cast_slice(buffer).map_err(|_| TweenError::MalformedRequest {
        field: "length",
        value: buffer.len() as f32,
    })?;
    records.iter().map(RequestRecord::to_command).collect()
}

/// Encode commands into a flat float buffer.
pub fn encode_requests(commands: &[TweenCommand<Vec3>]) -> Vec<f32> {
    let records: Vec<RequestRecord> = commands
        .iter()
        .map(|command| match command {
            TweenCommand::Activate(request) => RequestRecord::activate(request),
            TweenCommand::Cancel(entity) => RequestRecord::cancel(*entity),
        })
        .collect();
    bytemuck::cast_slice::<RequestRecord, f32>(&records[..]).to_vec()
}
