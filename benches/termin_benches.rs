use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use termin::availability::resolve_for_date;
use termin::booking::{Attendee, Booking};
use termin::interval::{WeeklyInterval, WeeklySchedule};
use termin::time::WeekDay;

fn resolve(c: &mut Criterion) {
    c.bench_function("resolve_open_day", |b| {
        let mut schedule = WeeklySchedule::new();
        for week_day in [
            WeekDay::Monday,
            WeekDay::Tuesday,
            WeekDay::Wednesday,
            WeekDay::Thursday,
            WeekDay::Friday,
        ] {
            schedule.set(WeeklyInterval::parse(week_day, "08:00", "18:00").unwrap());
        }

        let date = NaiveDate::from_ymd_opt(2022, 9, 22).unwrap();
        let now = NaiveDate::from_ymd_opt(2022, 9, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        b.iter(|| black_box(resolve_for_date(&schedule, &[], date, now)));
    });

    c.bench_function("resolve_booked_day", |b| {
        let mut schedule = WeeklySchedule::new();
        schedule.set(WeeklyInterval::parse(WeekDay::Thursday, "08:00", "18:00").unwrap());

        let date = NaiveDate::from_ymd_opt(2022, 9, 22).unwrap();
        let now = NaiveDate::from_ymd_opt(2022, 9, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let attendee = Attendee::new("Ada Lovelace", "ada@example.com", None).unwrap();
        let bookings: Vec<Booking> = (8..18)
            .step_by(2)
            .map(|hour| Booking::new(date.and_hms_opt(hour, 0, 0).unwrap(), attendee.clone()))
            .collect();

        b.iter(|| black_box(resolve_for_date(&schedule, &bookings, date, now)));
    });
}

criterion_group!(benches, resolve);
criterion_main!(benches);
