use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::AvailablePeriod;
use crate::builder::{
    require, require_not_blank, require_ordered, Build, Part, Result, ValidationError,
};

/// How many members of a group must be free for a slot to qualify.
///
/// Written as the string `"all"` or as a positive integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Required {
    #[default]
    AllRequired,
    AtLeast(NonZeroU32),
}

impl Required {
    /// A count requirement; zero is rejected.
    pub fn at_least(count: u32) -> Result<Self> {
        NonZeroU32::new(count)
            .map(Required::AtLeast)
            .ok_or(ValidationError::NotPositive { field: "required" })
    }
}

impl Serialize for Required {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Required::AllRequired => serializer.serialize_str("all"),
            Required::AtLeast(count) => serializer.serialize_u32(count.get()),
        }
    }
}

impl<'de> Deserialize<'de> for Required {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RequiredVisitor;

        impl Visitor<'_> for RequiredVisitor {
            type Value = Required;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"all\" or a positive integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Required, E> {
                match value {
                    "all" => Ok(Required::AllRequired),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Required, E> {
                u32::try_from(value)
                    .ok()
                    .and_then(NonZeroU32::new)
                    .map(Required::AtLeast)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Required, E> {
                match u64::try_from(value) {
                    Ok(value) => self.visit_u64(value),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
                }
            }
        }

        deserializer.deserialize_any(RequiredVisitor)
    }
}

/// One account taking part in an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_periods: Option<Vec<AvailablePeriod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_availability: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_managed_events: Option<bool>,
}

impl Member {
    /// A member with only a sub and no filters.
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            calendar_ids: None,
            available_periods: None,
            managed_availability: None,
            only_managed_events: None,
        }
    }
}

/// A set of members sharing one [`Required`] rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantGroup {
    pub members: Vec<Member>,
    pub required: Required,
}

impl ParticipantGroup {
    pub fn new(members: Vec<Member>, required: Required) -> Self {
        Self { members, required }
    }
}

/// Builds a [`Member`].
#[derive(Debug, Clone, Default)]
pub struct MemberBuilder {
    sub: Option<String>,
    calendar_ids: Option<Vec<String>>,
    available_periods: Option<Vec<AvailablePeriod>>,
    managed_availability: Option<bool>,
    only_managed_events: Option<bool>,
}

impl MemberBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub(&mut self, sub: &str) -> Result<&mut Self> {
        require_not_blank("sub", sub)?;
        self.sub = Some(sub.to_string());
        Ok(self)
    }

    /// Restricts the member to the given calendars. Either every id is
    /// accepted or none is.
    pub fn calendar_ids<I, S>(&mut self, calendar_ids: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = calendar_ids
            .into_iter()
            .map(|id| {
                require_not_blank("calendar_ids", id.as_ref())?;
                Ok(id.as_ref().to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        self.calendar_ids.get_or_insert_with(Vec::new).extend(ids);
        Ok(self)
    }

    pub fn add_available_period(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<&mut Self> {
        require_ordered(&start, &end)?;
        self.available_periods
            .get_or_insert_with(Vec::new)
            .push(AvailablePeriod::new(start, end));
        Ok(self)
    }

    pub fn managed_availability(&mut self, managed: bool) -> &mut Self {
        self.managed_availability = Some(managed);
        self
    }

    pub fn only_managed_events(&mut self, only_managed: bool) -> &mut Self {
        self.only_managed_events = Some(only_managed);
        self
    }
}

impl Build for MemberBuilder {
    type Output = Member;

    fn build(&self) -> Result<Member> {
        Ok(Member {
            sub: require("sub", self.sub.clone())?,
            calendar_ids: self.calendar_ids.clone(),
            available_periods: self.available_periods.clone(),
            managed_availability: self.managed_availability,
            only_managed_events: self.only_managed_events,
        })
    }
}

/// Builds a [`ParticipantGroup`].
///
/// Members given as values come first, then members from nested builders,
/// each in the order they were added.
#[derive(Default)]
pub struct ParticipantGroupBuilder {
    members: Vec<Member>,
    member_builders: Vec<Part<Member>>,
    required: Required,
}

impl ParticipantGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, sub: &str) -> Result<&mut Self> {
        require_not_blank("sub", sub)?;
        self.members.push(Member::new(sub));
        Ok(self)
    }

    pub fn add_member_value(&mut self, member: Member) -> Result<&mut Self> {
        require_not_blank("sub", &member.sub)?;
        self.members.push(member);
        Ok(self)
    }

    pub fn add_member_builder(
        &mut self,
        builder: impl Build<Output = Member> + 'static,
    ) -> &mut Self {
        self.member_builders.push(Box::new(builder));
        self
    }

    pub fn all_required(&mut self) -> &mut Self {
        self.required = Required::AllRequired;
        self
    }

    pub fn required_count(&mut self, count: u32) -> Result<&mut Self> {
        self.required = Required::at_least(count)?;
        Ok(self)
    }
}

impl fmt::Debug for ParticipantGroupBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantGroupBuilder")
            .field("members", &self.members)
            .field("member_builders", &self.member_builders.len())
            .field("required", &self.required)
            .finish()
    }
}

impl Build for ParticipantGroupBuilder {
    type Output = ParticipantGroup;

    fn build(&self) -> Result<ParticipantGroup> {
        let mut members = self.members.clone();
        for builder in &self.member_builders {
            members.push(builder.build()?);
        }
        if members.is_empty() {
            return Err(ValidationError::Missing { field: "members" });
        }
        Ok(ParticipantGroup::new(members, self.required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::shared;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_required_all_encodes_as_string() {
        assert_eq!(serde_json::to_value(Required::AllRequired).unwrap(), json!("all"));
    }

    #[test]
    fn test_required_count_encodes_as_integer() {
        assert_eq!(serde_json::to_value(Required::at_least(2).unwrap()).unwrap(), json!(2));
    }

    #[test]
    fn test_required_decodes_both_shapes() {
        let all: Required = serde_json::from_value(json!("all")).unwrap();
        assert_eq!(all, Required::AllRequired);
        let two: Required = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(two, Required::at_least(2).unwrap());
    }

    #[test]
    fn test_required_rejects_bad_shapes() {
        for value in [json!("some"), json!(0), json!(-1), json!(1.5), json!(null)] {
            let result: std::result::Result<Required, _> = serde_json::from_value(value.clone());
            assert!(result.is_err(), "{value}");
        }
    }

    #[test]
    fn test_required_at_least_zero_fails() {
        assert_eq!(
            Required::at_least(0),
            Err(ValidationError::NotPositive { field: "required" })
        );
    }

    #[test]
    fn test_member_minimal_wire_form() {
        assert_eq!(
            serde_json::to_value(Member::new("acc_1")).unwrap(),
            json!({"sub": "acc_1"})
        );
    }

    #[test]
    fn test_member_builder_full() {
        let start = Utc.with_ymd_and_hms(2017, 1, 3, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 1, 3, 12, 0, 0).unwrap();
        let mut builder = MemberBuilder::new();
        builder
            .sub("acc_1")
            .unwrap()
            .calendar_ids(["cal_1", "cal_2"])
            .unwrap()
            .add_available_period(start, end)
            .unwrap()
            .managed_availability(true)
            .only_managed_events(false);

        assert_eq!(
            serde_json::to_value(builder.build().unwrap()).unwrap(),
            json!({
                "sub": "acc_1",
                "calendar_ids": ["cal_1", "cal_2"],
                "available_periods": [
                    {"start": "2017-01-03T09:00:00Z", "end": "2017-01-03T12:00:00Z"}
                ],
                "managed_availability": true,
                "only_managed_events": false
            })
        );
    }

    #[test]
    fn test_member_builder_requires_sub() {
        assert_eq!(
            MemberBuilder::new().build(),
            Err(ValidationError::Missing { field: "sub" })
        );
    }

    #[test]
    fn test_calendar_ids_all_or_nothing() {
        let mut builder = MemberBuilder::new();
        builder.sub("acc_1").unwrap().calendar_ids(["cal_1"]).unwrap();

        let result = builder.calendar_ids(["cal_2", " "]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::Blank {
                field: "calendar_ids"
            }
        );
        assert_eq!(
            builder.build().unwrap().calendar_ids,
            Some(vec!["cal_1".to_string()])
        );
    }

    #[test]
    fn test_member_rejects_reversed_period() {
        let start = Utc.with_ymd_and_hms(2017, 1, 3, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 1, 3, 9, 0, 0).unwrap();
        let mut builder = MemberBuilder::new();
        assert!(matches!(
            builder.add_available_period(start, end),
            Err(ValidationError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_group_builder_orders_values_before_builders() {
        let nested = shared(MemberBuilder::new());
        nested.borrow_mut().sub("acc_nested").unwrap();

        let mut builder = ParticipantGroupBuilder::new();
        builder.add_member_builder(nested.clone());
        builder.add_member("acc_1").unwrap();

        let group = builder.build().unwrap();
        let subs: Vec<_> = group.members.iter().map(|m| m.sub.as_str()).collect();
        assert_eq!(subs, ["acc_1", "acc_nested"]);
        assert_eq!(group.required, Required::AllRequired);
    }

    #[test]
    fn test_group_builder_resolves_nested_builder_late() {
        let nested = shared(MemberBuilder::new());
        let mut builder = ParticipantGroupBuilder::new();
        builder.add_member_builder(nested.clone());

        assert_eq!(builder.build(), Err(ValidationError::Missing { field: "sub" }));

        nested.borrow_mut().sub("acc_late").unwrap();
        assert_eq!(builder.build().unwrap().members[0].sub, "acc_late");
    }

    #[test]
    fn test_group_builder_requires_members() {
        assert_eq!(
            ParticipantGroupBuilder::new().build(),
            Err(ValidationError::Missing { field: "members" })
        );
    }

    #[test]
    fn test_group_builder_required_count() {
        let mut builder = ParticipantGroupBuilder::new();
        builder
            .add_member("acc_1")
            .unwrap()
            .add_member("acc_2")
            .unwrap()
            .required_count(1)
            .unwrap();

        assert!(builder.required_count(0).is_err());
        assert_eq!(
            serde_json::to_value(builder.build().unwrap()).unwrap(),
            json!({"members": [{"sub": "acc_1"}, {"sub": "acc_2"}], "required": 1})
        );
    }
}
