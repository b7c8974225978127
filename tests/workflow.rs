#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use ponto::db::time_records::TimeRecords;
    use ponto::libs::admin::{add_manual_entry, delete_record, edit_record, AdminGate, ManualEntry, RecordEdit};
    use ponto::libs::calendar::{format_date_br_ymd, month_range_ymd};
    use ponto::libs::clock::{Clock, FixedClock};
    use ponto::libs::error::ClockError;
    use ponto::libs::grouping::{flatten, group_by_month};
    use ponto::libs::hours::{balance, LunchPolicy};
    use ponto::libs::punch::{punch, today, Employee};
    use ponto::libs::record::{DayState, DayTimes, PunchKind, RecordFilter, RecordQuery, TimeRecord};
    use ponto::libs::secret::Secret;
    use ponto::libs::store::RecordStore;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct WorkflowTestContext {
        _temp_dir: TempDir,
        store: TimeRecords,
        gate: AdminGate,
        employee: Employee,
        lunch: LunchPolicy,
    }

    impl TestContext for WorkflowTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = TimeRecords::open(&temp_dir.path().join("ponto.db")).unwrap();
            let gate = AdminGate::with_secret(Secret::at(&temp_dir.path().join(".admin_passphrase"), "Admin passphrase"));
            WorkflowTestContext {
                _temp_dir: temp_dir,
                store,
                gate,
                employee: Employee::new("u-17", "Ana Souza"),
                lunch: LunchPolicy::default(),
            }
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn at(h: u32, m: u32) -> FixedClock {
        FixedClock::at(date(), NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn hm(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn clock_error(err: anyhow::Error) -> ClockError {
        err.downcast::<ClockError>().unwrap()
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_full_day_of_punches(ctx: &mut WorkflowTestContext) {
        let first = punch(&mut ctx.store, &at(9, 0), &ctx.employee, PunchKind::Entry, ctx.lunch).unwrap();
        assert_eq!(first.state(), DayState::EntryMarked);

        punch(&mut ctx.store, &at(12, 0), &ctx.employee, PunchKind::LunchOut, ctx.lunch).unwrap();
        punch(&mut ctx.store, &at(13, 0), &ctx.employee, PunchKind::LunchBack, ctx.lunch).unwrap();
        let closed = punch(&mut ctx.store, &at(18, 0), &ctx.employee, PunchKind::Exit, ctx.lunch).unwrap();

        assert_eq!(closed.id, first.id);
        assert_eq!(closed.state(), DayState::Closed);
        assert_eq!(closed.total_hours, "08:00");

        let stored = today(&mut ctx.store, &at(18, 5), &ctx.employee).unwrap().unwrap();
        assert_eq!(stored, closed);
        assert_eq!(ctx.store.fetch(&RecordQuery::default()).unwrap().len(), 1);
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_punches_are_truncated_to_the_minute(ctx: &mut WorkflowTestContext) {
        let clock = FixedClock(date().and_hms_opt(9, 3, 47).unwrap());
        let record = punch(&mut ctx.store, &clock, &ctx.employee, PunchKind::Entry, ctx.lunch).unwrap();
        assert_eq!(record.times.entry, hm(9, 3));
        assert_eq!(record.created_at, clock.now());
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_out_of_order_and_repeated_punches(ctx: &mut WorkflowTestContext) {
        let err = punch(&mut ctx.store, &at(12, 0), &ctx.employee, PunchKind::LunchOut, ctx.lunch).unwrap_err();
        assert!(matches!(clock_error(err), ClockError::OutOfOrder { state: DayState::Empty, .. }));
        assert!(ctx.store.fetch(&RecordQuery::default()).unwrap().is_empty());

        punch(&mut ctx.store, &at(9, 0), &ctx.employee, PunchKind::Entry, ctx.lunch).unwrap();
        let err = punch(&mut ctx.store, &at(9, 1), &ctx.employee, PunchKind::Entry, ctx.lunch).unwrap_err();
        assert!(matches!(clock_error(err), ClockError::AlreadyMarked { kind: PunchKind::Entry, .. }));

        punch(&mut ctx.store, &at(17, 0), &ctx.employee, PunchKind::Exit, ctx.lunch).unwrap();
        let err = punch(&mut ctx.store, &at(17, 30), &ctx.employee, PunchKind::LunchOut, ctx.lunch).unwrap_err();
        assert_eq!(clock_error(err), ClockError::DayClosed);

        let record = today(&mut ctx.store, &at(18, 0), &ctx.employee).unwrap().unwrap();
        assert_eq!(record.times.entry, hm(9, 0));
        assert_eq!(record.times.exit, hm(17, 0));
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_admin_passphrase_gate(ctx: &mut WorkflowTestContext) {
        assert!(!ctx.gate.is_configured());
        assert_eq!(clock_error(ctx.gate.verify("anything").unwrap_err()), ClockError::AdminNotConfigured);

        ctx.gate.set_passphrase("s3nha").unwrap();
        assert!(ctx.gate.is_configured());
        assert!(ctx.gate.verify("s3nha").is_ok());
        assert_eq!(clock_error(ctx.gate.verify("senha").unwrap_err()), ClockError::AdminDenied);
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_manual_insert_edit_and_delete(ctx: &mut WorkflowTestContext) {
        let entry = ManualEntry {
            user_id: "u-18".to_string(),
            employee_name: "Bruno Lima".to_string(),
            date: Some(date()),
            times: DayTimes {
                entry: hm(9, 0),
                exit: hm(18, 0),
                ..Default::default()
            },
        };
        let record = add_manual_entry(&mut ctx.store, &entry, ctx.lunch, at(20, 0).now()).unwrap();
        assert_eq!(record.total_hours, "08:00");

        let edit = RecordEdit {
            date: date().pred_opt().unwrap(),
            times: DayTimes {
                entry: hm(8, 0),
                lunch_exit: hm(12, 0),
                lunch_return: hm(12, 30),
                exit: hm(18, 0),
            },
        };
        let edited = edit_record(&mut ctx.store, &record.id, &edit, ctx.lunch).unwrap();
        assert_eq!(edited.total_hours, "09:30");
        assert_eq!(ctx.store.get(&record.id).unwrap().unwrap().date, edit.date);

        delete_record(&mut ctx.store, &record.id).unwrap();
        assert!(ctx.store.get(&record.id).unwrap().is_none());
        let err = delete_record(&mut ctx.store, &record.id).unwrap_err();
        assert_eq!(clock_error(err), ClockError::RecordNotFound(record.id));
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_manual_insert_validation(ctx: &mut WorkflowTestContext) {
        let missing_times = ManualEntry {
            user_id: "u-18".to_string(),
            employee_name: "Bruno Lima".to_string(),
            date: Some(date()),
            times: DayTimes::default(),
        };
        let err = add_manual_entry(&mut ctx.store, &missing_times, ctx.lunch, at(20, 0).now()).unwrap_err();
        assert_eq!(clock_error(err), ClockError::MissingEntryOrExit);

        let missing_date = ManualEntry {
            date: None,
            ..missing_times.clone()
        };
        let err = add_manual_entry(&mut ctx.store, &missing_date, ctx.lunch, at(20, 0).now()).unwrap_err();
        assert_eq!(clock_error(err), ClockError::MissingField("date"));

        assert!(ctx.store.fetch(&RecordQuery::default()).unwrap().is_empty());
    }

    #[test_context(WorkflowTestContext)]
    #[test]
    fn test_month_listing_and_balance(ctx: &mut WorkflowTestContext) {
        let days = [
            (NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(), hm(9, 0), hm(18, 0)),
            (NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), hm(9, 0), hm(18, 0)),
            (NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), hm(8, 0), hm(18, 0)),
            (NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), hm(9, 0), None),
        ];
        for (day, entry, exit) in days {
            let record = TimeRecord::new("u-17", "Ana Souza", day, day.and_hms_opt(9, 0, 0).unwrap())
                .with_times(DayTimes { entry, exit, ..Default::default() }, ctx.lunch);
            ctx.store.insert(&record).unwrap();
        }

        let all = ctx.store.fetch(&RecordQuery::new(RecordFilter::All)).unwrap();
        let groups = group_by_month(all);
        assert_eq!(groups.iter().map(|g| g.key.as_str()).collect::<Vec<_>>(), vec!["2024-03", "2024-02"]);
        assert_eq!(groups[0].label, "março de 2024");
        let march_days: Vec<u32> = groups[0].records.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(march_days, vec![4, 5, 6]);
        assert_eq!(group_by_month(flatten(groups.clone())), groups);

        // 480 - 528 = -48 and 540 - 528 = +12; the open day does not count
        let march = ctx.store.fetch(&RecordQuery::new(RecordFilter::Month(date()))).unwrap();
        assert_eq!(balance(march.iter(), ctx.lunch, 528), "-00:36");

        let single = ctx.store.fetch(&RecordQuery::new(RecordFilter::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()))).unwrap();
        assert_eq!(balance(single.iter(), ctx.lunch, 528), "-00:48");
    }

    #[test]
    fn test_calendar_properties() {
        assert_eq!(month_range_ymd("2024-02-15"), ("2024-02-01".to_string(), "2024-02-29".to_string()));
        assert_eq!(month_range_ymd("2023-02-15"), ("2023-02-01".to_string(), "2023-02-28".to_string()));

        let br = format_date_br_ymd("2024-03-05");
        assert_eq!(br, "05/03/2024");
        let parts: Vec<&str> = br.split('/').collect();
        assert_eq!(format!("{}-{}-{}", parts[2], parts[1], parts[0]), "2024-03-05");
    }
}
