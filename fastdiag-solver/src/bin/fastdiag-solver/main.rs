mod os_signal_termination;
mod parser;
mod result;

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::File;
use std::io::Write;
use std::num::NonZero;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use fastdiag_solver::algorithms::DirectDebug;
use fastdiag_solver::algorithms::FastDiag;
use fastdiag_solver::algorithms::FastDiagMss;
use fastdiag_solver::algorithms::FlexDiag;
use fastdiag_solver::algorithms::QuickXplain;
use fastdiag_solver::convert_case::Case;
use fastdiag_solver::csp::CspOracle;
use fastdiag_solver::csp::KnowledgeBase;
use fastdiag_solver::hitting_set::ConstructionOutcome;
use fastdiag_solver::hitting_set::HittingSetEngine;
use fastdiag_solver::hitting_set::HittingSetOptions;
use fastdiag_solver::hitting_set::HittingSetVariant;
use fastdiag_solver::labelers::FastDiagLabeler;
use fastdiag_solver::labelers::FastDiagMssLabeler;
use fastdiag_solver::labelers::FlexDiagLabeler;
use fastdiag_solver::labelers::Labeler;
use fastdiag_solver::labelers::QuickXplainLabeler;
use fastdiag_solver::oracle::MonitoredOracle;
use fastdiag_solver::statistics::configure_statistic_logging;
use fastdiag_solver::statistics::log_statistic_postfix;
use fastdiag_solver::termination::Combinator;
use fastdiag_solver::termination::TerminationCondition;
use fastdiag_solver::termination::TimeBudget;
use fastdiag_solver::ConstraintSet;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::FastDiagError;
use result::FastDiagResult;

type Oracle = MonitoredOracle<CspOracle>;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The knowledge base to diagnose, given as a '*.kb' file. Each line of the file is one of:
    ///  - 'var <name> <lb>..<ub>' or 'var <name> <v1>,<v2>,...' to declare a variable,
    ///  - 'constraint <name>: <clause>' for a constraint which may be faulty,
    ///  - 'background <name>: <clause>' for a constraint which is assumed to be correct,
    ///  - 'test <name>: <clause> ; <clause> ; ...' for a test case.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The algorithm which computes a conflict or a diagnosis.
    ///
    /// QuickXplain computes a minimal conflict, all other algorithms compute a diagnosis.
    /// DirectDebug diagnoses the knowledge base with respect to its test cases.
    #[arg(short = 'a', long, value_enum, default_value_t)]
    algorithm: Algorithm,

    /// Enumerates all minimal conflicts and diagnoses with a hitting-set search, which calls the
    /// selected algorithm once per node.
    ///
    /// Possible values: bool
    #[arg(long = "all", verbatim_doc_comment)]
    all: bool,

    /// The shape of the hitting-set search. Only used together with "--all".
    #[arg(long, value_enum, default_value_t)]
    variant: HittingSetVariant,

    /// Stops the hitting-set search after this many hitting sets have been found.
    ///
    /// Possible values: usize (Optional)
    #[arg(long = "max-diagnoses", verbatim_doc_comment)]
    max_diagnoses: Option<NonZero<usize>>,

    /// Stops the hitting-set search after this many labels have been computed.
    ///
    /// Possible values: usize (Optional)
    #[arg(long = "max-conflicts", verbatim_doc_comment)]
    max_conflicts: Option<NonZero<usize>>,

    /// Closes the nodes of the hitting-set search which are deeper than this.
    ///
    /// Possible values: usize (Optional)
    #[arg(long = "max-depth", verbatim_doc_comment)]
    max_depth: Option<NonZero<usize>>,

    /// The number of constraints FlexDiag removes at once. With 1 it computes the same minimal
    /// diagnosis as FastDiag; larger values need fewer consistency checks, but the diagnosis may
    /// no longer be minimal.
    ///
    /// Possible values: usize
    #[arg(long = "flexdiag-m", default_value_t = NonZero::<usize>::MIN, verbatim_doc_comment)]
    flexdiag_m: NonZero<usize>,

    /// The time budget for the hitting-set search, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// Enables log message output from the algorithms.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the oracle and the hitting-set search.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// A minimal conflict.
    QuickXplain,
    /// A minimal diagnosis, by partitioning the constraints which are removed.
    #[default]
    FastDiag,
    /// A minimal diagnosis, by growing a maximal satisfiable subset.
    FastDiagMss,
    /// A minimal diagnosis with respect to the test cases.
    DirectDebug,
    /// A diagnosis which removes up to "--flexdiag-m" constraints at once.
    FlexDiag,
}

/// What a set of constraints printed by the binary is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Explanation {
    Conflict,
    Diagnosis,
}

impl Explanation {
    /// The hitting sets of conflicts are diagnoses, and vice versa.
    fn dual(self) -> Explanation {
        match self {
            Explanation::Conflict => Explanation::Diagnosis,
            Explanation::Diagnosis => Explanation::Conflict,
        }
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Explanation::Conflict => write!(f, "conflict"),
            Explanation::Diagnosis => write!(f, "diagnosis"),
        }
    }
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%fastdiag-stat:",
            Some("%%%fastdiag-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> FastDiagResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if fastdiag_solver::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION
        >= fastdiag_solver::asserts::FASTDIAG_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the FastDiag assert level is set to {}, meaning \
             many debug asserts are active which may result in performance degradation.",
            fastdiag_solver::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION
        );
    };

    if args.instance_path.extension().and_then(|ext| ext.to_str()) != Some("kb") {
        return Err(FastDiagError::invalid_instance(args.instance_path.display()));
    }

    let knowledge_base = parser::parse_knowledge_base(File::open(&args.instance_path)?)?;
    let oracle = MonitoredOracle::new(CspOracle::with_test_cases(knowledge_base.clone()));

    if args.all {
        enumerate(&args, oracle, &knowledge_base)
    } else {
        explain_once(&args, oracle, &knowledge_base)
    }
}

/// Runs the selected algorithm once and prints its result.
fn explain_once(
    args: &Args,
    oracle: Oracle,
    knowledge_base: &KnowledgeBase,
) -> FastDiagResult<()> {
    let consideration = knowledge_base.consideration();
    let background = knowledge_base.background();
    let all_constraints = background.union(consideration);

    let (explanation, result, oracle) = match args.algorithm {
        Algorithm::QuickXplain => {
            let mut quickxplain = QuickXplain::new(oracle);
            let conflict = quickxplain.find_conflict_set(consideration, background)?;
            (Explanation::Conflict, conflict, quickxplain.into_oracle())
        }
        Algorithm::FastDiag => {
            let mut fastdiag = FastDiag::new(oracle);
            let diagnosis = fastdiag.find_diagnosis(consideration, &all_constraints)?;
            (Explanation::Diagnosis, diagnosis, fastdiag.into_oracle())
        }
        Algorithm::FastDiagMss => {
            let mut fastdiag = FastDiagMss::new(oracle);
            let diagnosis = fastdiag.find_diagnosis(consideration, background)?;
            (Explanation::Diagnosis, diagnosis, fastdiag.into_oracle())
        }
        Algorithm::DirectDebug => {
            let test_cases = test_cases_of(knowledge_base);
            let mut direct_debug = DirectDebug::new(oracle);
            let diagnosis = direct_debug.find_diagnosis(consideration, background, &test_cases)?;
            (Explanation::Diagnosis, diagnosis, direct_debug.into_oracle())
        }
        Algorithm::FlexDiag => {
            let mut flexdiag = FlexDiag::new(oracle, args.flexdiag_m);
            let diagnosis = flexdiag.find_diagnosis(consideration, &all_constraints)?;
            (Explanation::Diagnosis, diagnosis, flexdiag.into_oracle())
        }
    };

    print_explanations(explanation, [&result], knowledge_base);
    println!("% done");

    oracle.log_statistics();
    log_statistic_postfix();

    Ok(())
}

/// Enumerates the hitting sets of the labels computed by the selected algorithm.
fn enumerate(
    args: &Args,
    oracle: Oracle,
    knowledge_base: &KnowledgeBase,
) -> FastDiagResult<()> {
    let consideration = knowledge_base.consideration().clone();
    let background = knowledge_base.background().clone();

    let options = HittingSetOptions {
        variant: args.variant,
        max_number_of_diagnoses: args.max_diagnoses,
        max_number_of_conflicts: args.max_conflicts,
        max_depth: args.max_depth,
    };
    let mut termination = Combinator::new(
        OsSignal::install()?,
        args.time_limit
            .map(|budget| TimeBudget::starting_now(Duration::from_millis(budget))),
    );

    match args.algorithm {
        Algorithm::QuickXplain => run_engine(
            QuickXplainLabeler::new(oracle, consideration, background),
            Explanation::Conflict,
            options,
            &mut termination,
            knowledge_base,
            QuickXplainLabeler::oracle,
        ),
        Algorithm::FastDiag => run_engine(
            FastDiagLabeler::new(oracle, consideration, background),
            Explanation::Diagnosis,
            options,
            &mut termination,
            knowledge_base,
            FastDiagLabeler::oracle,
        ),
        Algorithm::FastDiagMss => run_engine(
            FastDiagMssLabeler::new(oracle, consideration, background),
            Explanation::Diagnosis,
            options,
            &mut termination,
            knowledge_base,
            FastDiagMssLabeler::oracle,
        ),
        Algorithm::DirectDebug => run_engine(
            FastDiagMssLabeler::with_test_cases(
                oracle,
                consideration,
                background,
                test_cases_of(knowledge_base),
            ),
            Explanation::Diagnosis,
            options,
            &mut termination,
            knowledge_base,
            FastDiagMssLabeler::oracle,
        ),
        Algorithm::FlexDiag => run_engine(
            FlexDiagLabeler::new(oracle, consideration, background, args.flexdiag_m),
            Explanation::Diagnosis,
            options,
            &mut termination,
            knowledge_base,
            FlexDiagLabeler::oracle,
        ),
    }
}

fn run_engine<L: Labeler>(
    labeler: L,
    labels: Explanation,
    options: HittingSetOptions,
    termination: &mut impl TerminationCondition,
    knowledge_base: &KnowledgeBase,
    oracle_of: impl Fn(&L) -> &Oracle,
) -> FastDiagResult<()> {
    if !labeler.is_minimal() {
        warn!("The labels are not guaranteed to be minimal, neither are the hitting sets");
    }

    let mut engine = HittingSetEngine::new(labeler, options);
    match engine.construct_with_termination(termination)? {
        ConstructionOutcome::Exhausted => {}
        ConstructionOutcome::LimitReached => info!("The search stopped at a limit"),
        ConstructionOutcome::Interrupted => {
            warn!("The search was interrupted, the results may be incomplete")
        }
    }

    print_explanations(labels, engine.conflicts(), knowledge_base);
    print_explanations(labels.dual(), engine.diagnoses(), knowledge_base);
    println!("% done");

    engine.log_statistics();
    oracle_of(engine.labeler()).log_statistics();
    log_statistic_postfix();

    Ok(())
}

fn test_cases_of(knowledge_base: &KnowledgeBase) -> fastdiag_solver::TestCaseSet {
    let test_cases = knowledge_base.all_test_cases();
    if test_cases.is_empty() {
        warn!("The knowledge base has no test cases, so no diagnosis will be found");
    }
    test_cases
}

fn print_explanations<'a>(
    explanation: Explanation,
    constraint_sets: impl IntoIterator<Item = &'a ConstraintSet>,
    knowledge_base: &KnowledgeBase,
) {
    let mut num_printed = 0;
    for constraints in constraint_sets
        .into_iter()
        .filter(|constraints| !constraints.is_empty())
    {
        println!("{explanation}: {}", knowledge_base.describe(constraints));
        num_printed += 1;
    }

    if num_printed == 0 {
        println!("no {explanation}");
    }
}
