#[derive(Debug, Clone)]
pub enum Message {
    // === PUNCH MESSAGES ===
    PunchRecorded(String, String), // label, time
    TodayHeader(String),           // long date label
    NoRecordToday,
    DayTotal(String),
    OvertimeWarning,

    // === RECORD MESSAGES ===
    RecordsHeader(usize),
    NoRecordsFound,
    BalanceForPeriod(String),
    RecordUpdated,
    RecordDeleted,
    ManualRecordAdded,
    RecordsCleared(usize),
    ConfirmDeleteRecord(String, String), // employee, date
    ConfirmClearAll,
    OperationCancelled,

    // === EMPLOYEE MESSAGES ===
    EmployeeAdded(String),
    EmployeeRemoved(String),
    NoEmployees,
    EmployeesHeader,
    ProfileRequired,
    LocalStorageRequired,

    // === ADMIN MESSAGES ===
    AdminPassphraseSet,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleWork,
    ConfigModuleProfile,
    ConfigModuleStorage,

    // === EXPORT MESSAGES ===
    ExportCompleted(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptStorageBackend,
    PromptDefaultLunch,
    PromptDailyThreshold,
    PromptOvertimeThreshold,
    PromptUserId,
    PromptEmployeeName,
    PromptAdminPassphrase,
}
