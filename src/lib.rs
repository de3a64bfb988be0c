pub mod entity {
    pub mod availability;
    pub mod booking_request;
    pub mod calendar;
    pub mod class_schedule;
    pub mod contact;
    pub mod datetime;
    pub mod schedule_config;
    pub mod selection;
    pub mod time_slot;
}

pub mod application {
    pub mod booking_desk;
    pub mod generate_class_schedules;
    pub mod interface;
    pub mod show_class_schedules;
    pub mod submit_booking;
}

pub mod adapter {
    pub mod gateway {
        pub mod log_notifier;
        pub mod yaml;
    }
}
