mod builder;
mod participants;
mod types;

pub use builder::{AvailabilityRequestBuilder, BufferBuilder};
pub use participants::{Member, MemberBuilder, ParticipantGroup, ParticipantGroupBuilder, Required};
pub use types::{
    AvailabilityRequest, AvailabilityResponse, AvailablePeriod, AvailablePeriodResult, Buffer,
    BufferDefinition, Duration, ParticipantRef,
};
