//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::roster::{
    BookMemberCommand, BookMemberHandler, BookMemberResult, CancelBookingCommand,
    CancelBookingHandler, CancelBookingResult, CancelClassCommand, CancelClassHandler,
    CancelClassResult, CreateClassSessionCommand, CreateClassSessionHandler,
    CreateClassSessionResult, DeleteClassSessionCommand, DeleteClassSessionHandler,
    GetRosterHandler, GetRosterQuery, ListClassSessionsHandler, ListClassSessionsQuery,
    RosterDispatcher, SessionLocks, SetCapacityCommand, SetCapacityHandler, SetCapacityResult,
};
