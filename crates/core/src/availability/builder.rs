use std::fmt;

use chrono::{DateTime, Utc};

use super::participants::{Member, ParticipantGroup, Required};
use super::types::{AvailabilityRequest, AvailablePeriod, Buffer, BufferDefinition, Duration};
use crate::builder::{
    require, require_not_blank, require_ordered, require_positive, Build, Part, Result,
    ValidationError,
};

/// Builds an [`AvailabilityRequest`].
///
/// Participant groups come out in a fixed order:
///
/// 1. one group holding every sub passed to
///    [`add_required_participant`](Self::add_required_participant), with
///    `required: "all"`
/// 2. groups added as values, in insertion order
/// 3. groups added as builders, in insertion order
///
/// The order does not depend on how those calls were interleaved.
#[derive(Default)]
pub struct AvailabilityRequestBuilder {
    required_participants: Vec<String>,
    groups: Vec<ParticipantGroup>,
    group_builders: Vec<Part<ParticipantGroup>>,
    required_duration: Option<Duration>,
    available_periods: Vec<AvailablePeriod>,
    buffer: Option<Part<Buffer>>,
    start_interval: Option<Duration>,
}

impl AvailabilityRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sub that must be free for every slot.
    pub fn add_required_participant(&mut self, sub: &str) -> Result<&mut Self> {
        require_not_blank("sub", sub)?;
        self.required_participants.push(sub.to_string());
        Ok(self)
    }

    /// Adds several required subs; nothing is added if any is blank.
    pub fn add_required_participants<I, S>(&mut self, subs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subs = subs
            .into_iter()
            .map(|sub| {
                require_not_blank("sub", sub.as_ref())?;
                Ok(sub.as_ref().to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        self.required_participants.extend(subs);
        Ok(self)
    }

    pub fn add_participant_group(&mut self, group: ParticipantGroup) -> Result<&mut Self> {
        if group.members.is_empty() {
            return Err(ValidationError::Missing { field: "members" });
        }
        self.groups.push(group);
        Ok(self)
    }

    pub fn add_participant_group_builder(
        &mut self,
        builder: impl Build<Output = ParticipantGroup> + 'static,
    ) -> &mut Self {
        self.group_builders.push(Box::new(builder));
        self
    }

    pub fn required_duration(&mut self, minutes: u32) -> Result<&mut Self> {
        require_positive("required_duration", minutes)?;
        self.required_duration = Some(Duration::minutes(minutes));
        Ok(self)
    }

    pub fn add_available_period(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<&mut Self> {
        require_ordered(&start, &end)?;
        self.available_periods.push(AvailablePeriod::new(start, end));
        Ok(self)
    }

    pub fn buffer(&mut self, buffer: Buffer) -> &mut Self {
        self.buffer = Some(Box::new(crate::builder::Ready(buffer)));
        self
    }

    pub fn buffer_builder(&mut self, builder: impl Build<Output = Buffer> + 'static) -> &mut Self {
        self.buffer = Some(Box::new(builder));
        self
    }

    pub fn start_interval(&mut self, minutes: u32) -> Result<&mut Self> {
        require_positive("start_interval", minutes)?;
        self.start_interval = Some(Duration::minutes(minutes));
        Ok(self)
    }
}

impl fmt::Debug for AvailabilityRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityRequestBuilder")
            .field("required_participants", &self.required_participants)
            .field("groups", &self.groups)
            .field("group_builders", &self.group_builders.len())
            .field("required_duration", &self.required_duration)
            .field("available_periods", &self.available_periods)
            .field("buffer", &self.buffer.is_some())
            .field("start_interval", &self.start_interval)
            .finish()
    }
}

impl Build for AvailabilityRequestBuilder {
    type Output = AvailabilityRequest;

    fn build(&self) -> Result<AvailabilityRequest> {
        let capacity = 1 + self.groups.len() + self.group_builders.len();
        let mut participants = Vec::with_capacity(capacity);

        if !self.required_participants.is_empty() {
            let members = self
                .required_participants
                .iter()
                .map(Member::new)
                .collect();
            participants.push(ParticipantGroup::new(members, Required::AllRequired));
        }
        participants.extend(self.groups.iter().cloned());
        for builder in &self.group_builders {
            participants.push(builder.build()?);
        }

        if participants.is_empty() {
            return Err(ValidationError::Missing {
                field: "participants",
            });
        }

        let buffer = match &self.buffer {
            Some(part) => Some(part.build()?),
            None => None,
        };

        Ok(AvailabilityRequest {
            participants,
            required_duration: require("required_duration", self.required_duration)?,
            available_periods: self.available_periods.clone(),
            buffer,
            start_interval: self.start_interval,
        })
    }
}

/// Builds a [`Buffer`]. Each side is only written when something was set
/// on it.
#[derive(Debug, Clone, Default)]
pub struct BufferBuilder {
    before: BufferDefinition,
    after: BufferDefinition,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_minimum(&mut self, minutes: u32) -> Result<&mut Self> {
        self.before = with_minimum(self.before, "buffer.before", minutes)?;
        Ok(self)
    }

    pub fn before_maximum(&mut self, minutes: u32) -> Result<&mut Self> {
        self.before = with_maximum(self.before, "buffer.before", minutes)?;
        Ok(self)
    }

    pub fn after_minimum(&mut self, minutes: u32) -> Result<&mut Self> {
        self.after = with_minimum(self.after, "buffer.after", minutes)?;
        Ok(self)
    }

    pub fn after_maximum(&mut self, minutes: u32) -> Result<&mut Self> {
        self.after = with_maximum(self.after, "buffer.after", minutes)?;
        Ok(self)
    }
}

impl Build for BufferBuilder {
    type Output = Buffer;

    fn build(&self) -> Result<Buffer> {
        let side = |definition: BufferDefinition| {
            (definition != BufferDefinition::default()).then_some(definition)
        };
        Ok(Buffer {
            before: side(self.before),
            after: side(self.after),
        })
    }
}

fn with_minimum(
    definition: BufferDefinition,
    field: &'static str,
    minutes: u32,
) -> Result<BufferDefinition> {
    let updated = BufferDefinition {
        minimum: Some(Duration::minutes(minutes)),
        ..definition
    };
    check_bounds(updated, field)
}

fn with_maximum(
    definition: BufferDefinition,
    field: &'static str,
    minutes: u32,
) -> Result<BufferDefinition> {
    let updated = BufferDefinition {
        maximum: Some(Duration::minutes(minutes)),
        ..definition
    };
    check_bounds(updated, field)
}

fn check_bounds(definition: BufferDefinition, field: &'static str) -> Result<BufferDefinition> {
    match (definition.minimum, definition.maximum) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::MinimumAboveMaximum { field }),
        _ => Ok(definition),
    }
}
