//! Typed view of a decoded GTFS-Realtime feed.
//!
//! Only the parts the resolver reads are kept: which trips have a vehicle
//! reporting, and which trips have a trip update.

use prost::Message;

use super::error::RealtimeError;

/// A decoded realtime feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub entities: Vec<FeedEntity>,
}

/// One entity of a feed. Either sub-record may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntity {
    pub id: String,
    pub vehicle: Option<VehiclePosition>,
    pub trip_update: Option<TripUpdate>,
}

/// Reference from an entity to a scheduled trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripRef {
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
}

/// A live vehicle report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehiclePosition {
    pub trip: Option<TripRef>,
}

/// A trip update. Always refers to a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripUpdate {
    pub trip: TripRef,
}

impl Feed {
    /// Decode a protobuf-encoded GTFS-Realtime `FeedMessage`.
    pub fn decode(bytes: &[u8]) -> Result<Self, RealtimeError> {
        let message = gtfs_realtime::FeedMessage::decode(bytes)?;
        Ok(Self::from(message))
    }
}

impl From<gtfs_realtime::FeedMessage> for Feed {
    fn from(message: gtfs_realtime::FeedMessage) -> Self {
        Self {
            entities: message.entity.into_iter().map(FeedEntity::from).collect(),
        }
    }
}

impl From<gtfs_realtime::FeedEntity> for FeedEntity {
    fn from(entity: gtfs_realtime::FeedEntity) -> Self {
        Self {
            id: entity.id,
            vehicle: entity.vehicle.map(|v| VehiclePosition {
                trip: v.trip.map(TripRef::from),
            }),
            trip_update: entity.trip_update.map(|u| TripUpdate {
                trip: TripRef::from(u.trip),
            }),
        }
    }
}

impl From<gtfs_realtime::TripDescriptor> for TripRef {
    fn from(trip: gtfs_realtime::TripDescriptor) -> Self {
        Self {
            trip_id: trip.trip_id,
            route_id: trip.route_id,
        }
    }
}
