//! `sg-fleet` — the vehicles, stops and people a simulation run moves.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`bus`]        | `Bus` — capacity, load, pickup / drop-off               |
//! | [`stop`]       | `BusStop` — waiting-passenger counter                   |
//! | [`template`]   | `ShiftWindow`, `WeekTemplate` (7 optional windows)      |
//! | [`driver`]     | `Driver`, `DriverKind`, `DutyState` state machine       |
//! | [`assignment`] | `ShiftAssignment` — one driver per bus slot             |
//!
//! # Duty state machine (summary)
//!
//! ```text
//!            enters window (and 3-day cycle)        final stop + break rule
//!  OffDuty ─────────────────────────────────▶ Working ───────────────────▶ OnBreak
//!     ▲            leaves window                 │  ▲     elapsed ≥ length      │
//!     └──────────────────────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! Only a `Working` driver moves a bus.

pub mod assignment;
pub mod bus;
pub mod driver;
pub mod stop;
pub mod template;


pub use assignment::ShiftAssignment;
pub use bus::Bus;
pub use driver::{Driver, DriverKind, DutyState, LUNCH_WINDOW, ROTATION_PERIOD_DAYS};
pub use stop::BusStop;
pub use template::{ShiftWindow, WeekTemplate};
