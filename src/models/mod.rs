pub mod job;
pub mod loaders;
pub mod record;
pub mod shape;

pub use job::{Job, JobFile};
pub use loaders::{load_jobs, parse_jobs};
pub use record::{
    Answer, Dropdown, DropdownSet, Impact, ImpactFactor, MultiSourceReasoning, MultipleChoice,
    OptionLabel, OptionMap, QuestionRecord, RcQuestion, ReadingComprehension,
    SingleChoiceQuestion, Source, StatementVerdict, Support, SupportStatement, TableRow,
    TableStatement, TableWithStatements, TwoPartAnalysis, YesNo,
};
pub use shape::QuestionShape;
