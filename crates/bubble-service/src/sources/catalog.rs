//! Source profiles - venue rosters and event-kind pools per feed

use super::mock::SourceProfile;

/// Nightlife and concert venues
pub const EVENTBRITE: SourceProfile = SourceProfile {
    name: "eventbrite",
    city: "Amsterdam",
    event_url: "https://www.eventbrite.com/",
    caption_suffix: "Upcoming event in Amsterdam",
    events_per_cycle: 15,
    horizon_hours: 7.0 * 24.0,
    min_duration_hours: 2.0,
    max_duration_hours: 8.0,
    venues: &[
        "Paradiso",
        "Melkweg",
        "De School",
        "AFAS Live",
        "Muziekgebouw aan 't IJ",
        "Ziggo Dome",
        "Tolhuistuin",
        "Wonzimer",
        "De Marktkantine",
        "Canvas",
        "Shelter",
        "Claire",
        "Radion",
        "De Nieuwe Anita",
        "OT301",
        "Bitterzoet",
        "AIR",
        "Chicago Social Club",
        "Chin Chin Club",
        "De Duivel",
    ],
    kinds: &[
        "Live Music",
        "DJ Set",
        "Techno Night",
        "Jazz Session",
        "Stand-up Comedy",
        "Art Exhibition",
        "Food Market",
        "Meetup",
        "Workshop",
        "Film Screening",
        "Poetry Slam",
        "Open Mic Night",
        "Dance Performance",
        "Indie Concert",
        "Hip Hop Night",
    ],
};

/// Student associations and university venues
pub const STUDENT: SourceProfile = SourceProfile {
    name: "student",
    city: "Amsterdam",
    event_url: "https://www.facebook.com/events/",
    caption_suffix: "Student event",
    events_per_cycle: 8,
    // Student events: mostly in the next few days
    horizon_hours: 3.0 * 24.0,
    min_duration_hours: 1.5,
    max_duration_hours: 5.5,
    venues: &[
        "CREA",
        "ASVA Student Union",
        "USC",
        "VU Student Centre",
        "UvA Roeterseiland",
        "UvA Science Park",
        "Pakhuis de Zwijger",
        "Studio K",
        "Mezrab",
        "Aula UvA",
    ],
    kinds: &[
        "Study Session",
        "Student Party",
        "Board Game Night",
        "Quiz Night",
        "Pub Crawl",
        "Language Exchange",
        "Workshop",
        "Career Fair",
        "Guest Lecture",
        "Open Mic",
        "Movie Night",
        "Debate Night",
        "Networking Drinks",
        "Sports Tournament",
        "Volunteer Day",
    ],
};

/// Community spaces and meetup venues
pub const COMMUNITY: SourceProfile = SourceProfile {
    name: "community",
    city: "Amsterdam",
    event_url: "https://www.meetup.com/",
    caption_suffix: "Community event",
    events_per_cycle: 8,
    horizon_hours: 5.0 * 24.0,
    min_duration_hours: 1.0,
    max_duration_hours: 4.0,
    venues: &[
        "Impact Hub",
        "Spaces Vijzelstraat",
        "B. Amsterdam",
        "Volkshotel",
        "A Lab",
        "De Ceuvel",
        "Mediamatic",
        "Het HEM",
        "Pllek",
        "Ndsm Wharf",
        "Foodhallen",
        "Westergasfabriek",
    ],
    kinds: &[
        "Tech Meetup",
        "Startup Pitch Night",
        "Yoga Session",
        "Meditation Circle",
        "Cooking Workshop",
        "Photography Walk",
        "Book Club",
        "Running Club",
        "Chess Meetup",
        "Boardgame Cafe",
        "Knitting Circle",
        "Language Cafe",
        "Improv Workshop",
        "Bitcoin Meetup",
        "Sustainability Talk",
    ],
};
