//! The events page walkthrough.

use tour::{Side, TourStep};

/// Six stops, top of the page to bottom.
pub fn campus_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "tour-calendar",
            "Your Calendar",
            "This is your mini calendar. Toggle it to quickly check dates and manage your \
             schedule without leaving the page.",
        )
        .side(Side::Left),
        TourStep::new(
            "tour-notifications",
            "Notifications",
            "Stay updated with alerts for upcoming events, deadline reminders, and invitations \
             from peers.",
        )
        .side(Side::Bottom),
        TourStep::new(
            "tour-filter",
            "Smart Filters",
            "Use these filters to quickly find specific types of events like Hackathons, \
             Workshops, or Fests.",
        )
        .side(Side::Bottom),
        TourStep::new(
            "tour-closing",
            "Closing Soon",
            "These events are starting or closing registration soon. Act fast to secure your \
             spot!",
        )
        .side(Side::Top),
        TourStep::new(
            "tour-upcoming",
            "Upcoming Events",
            "Browse all future events here. Plan your schedule ahead of time.",
        )
        .side(Side::Top),
        TourStep::new(
            "tour-past",
            "Past Archives",
            "View previous events to see what you missed or check out winners and galleries.",
        )
        .side(Side::Top),
    ]
}
