//! Same-day scheduling for when the store is closed.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{OrderError, Result};
use crate::generator::{render_schedule_request, WhatsAppLink};

/// A pickup/delivery time on the half-hour grid, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeSlot)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeSlot {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(TimeSlot)
            .map_err(|_| OrderError::InvalidTime {
                value: s.to_string(),
                expected: "HH:MM".to_string(),
            })
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Every slot from opening time, stepping `slot_minutes`, strictly before closing.
pub fn time_slot_grid(config: &StoreConfig) -> Vec<TimeSlot> {
    let step = config.slot_minutes.max(1);
    let start = config.open_hour.min(24) * 60;
    let end = config.close_hour.min(24) * 60;

    (start..end)
        .step_by(step as usize)
        .filter_map(|minutes| TimeSlot::new(minutes / 60, minutes % 60))
        .collect()
}

/// Slots strictly later than `now`, compared at minute resolution.
pub fn available_time_slots(grid: &[TimeSlot], now: NaiveTime) -> Vec<TimeSlot> {
    let now = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now);
    grid.iter().copied().filter(|slot| slot.0 > now).collect()
}

/// The scheduling dialog: either picking a slot, or nothing left today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleFlow {
    SlotPicker {
        slots: Vec<TimeSlot>,
        selected: TimeSlot,
    },
    Unavailable,
}

impl ScheduleFlow {
    /// Open the dialog at `now`.
    pub fn open(config: &StoreConfig, now: NaiveDateTime) -> Self {
        let slots = available_time_slots(&time_slot_grid(config), now.time());
        debug!("{} slot(s) left at {}", slots.len(), now.format("%H:%M"));
        Self::from_slots(slots)
    }

    /// Picker preselecting the first slot, or `Unavailable` if there are none.
    pub fn from_slots(slots: Vec<TimeSlot>) -> Self {
        match slots.first().copied() {
            Some(selected) => ScheduleFlow::SlotPicker { slots, selected },
            None => ScheduleFlow::Unavailable,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ScheduleFlow::Unavailable)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            ScheduleFlow::SlotPicker { slots, .. } => slots,
            ScheduleFlow::Unavailable => &[],
        }
    }

    pub fn selected(&self) -> Option<TimeSlot> {
        match self {
            ScheduleFlow::SlotPicker { selected, .. } => Some(*selected),
            ScheduleFlow::Unavailable => None,
        }
    }

    /// Pick one of the offered slots.
    pub fn select(&mut self, slot: TimeSlot) -> Result<()> {
        match self {
            ScheduleFlow::SlotPicker { slots, selected } => {
                if !slots.contains(&slot) {
                    return Err(OrderError::SlotUnavailable {
                        slot: slot.to_string(),
                    });
                }
                *selected = slot;
                Ok(())
            }
            ScheduleFlow::Unavailable => Err(OrderError::NoSlotsAvailable),
        }
    }

    /// Request text for the selected slot on `date`.
    pub fn request_message(&self, date: NaiveDate) -> Result<String> {
        let slot = self.selected().ok_or(OrderError::NoSlotsAvailable)?;
        Ok(render_schedule_request(date, slot))
    }

    /// WhatsApp link carrying the request.
    pub fn submit(&self, date: NaiveDate, config: &StoreConfig) -> Result<WhatsAppLink> {
        let message = self.request_message(date)?;
        Ok(WhatsAppLink::new(config.whatsapp_number.clone(), message))
    }
}

/// Text of the terminal "unavailable" state.
pub fn unavailable_message(config: &StoreConfig) -> String {
    format!(
        "Não há mais horários disponíveis para hoje. Por favor, tente novamente amanhã \
         durante nosso horário de funcionamento ({}).",
        config.opening_hours()
    )
}
