use aeon_editor::editor::services::{BuiltinFormats, ScriptedDialogs};
use aeon_editor::{
    Channel, CommandOutcome, EditorCommand, EditorController, GraphView, LiveModel, ModelEvent,
    Monotonicity, RegulationId, SimpleEventBus, VariablesPanel,
};
use cucumber::World;
use std::sync::{Arc, Mutex};

/// Editor state shared by the steps of one scenario
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct EditorWorld {
    /// Real controller with built-in formats and scripted dialogs
    pub controller: EditorController,

    pub dialogs: ScriptedDialogs,

    pub graph: GraphView,

    pub panel: VariablesPanel,

    /// Every event delivered on the bus, in delivery order
    pub events: Arc<Mutex<Vec<ModelEvent>>>,

    pub last_outcome: Option<CommandOutcome>,

    pub last_error: Option<String>,
}

impl EditorWorld {
    pub fn new() -> Self {
        let model = LiveModel::new(Arc::new(SimpleEventBus::with_debug_mode(true)));
        let events = Arc::new(Mutex::new(Vec::new()));
        for channel in Channel::ALL {
            let recorded = events.clone();
            model.events().add_listener(
                channel,
                Arc::new(move |event: &ModelEvent| {
                    recorded.lock().unwrap().push(event.clone());
                }),
            );
        }

        let graph = GraphView::attach(&model);
        let panel = VariablesPanel::attach(&model);
        let dialogs = ScriptedDialogs::new();
        let controller = EditorController::new(
            model,
            Arc::new(BuiltinFormats::new()),
            Arc::new(dialogs.clone()),
        );

        Self {
            controller,
            dialogs,
            graph,
            panel,
            events,
            last_outcome: None,
            last_error: None,
        }
    }

    pub fn model(&self) -> &LiveModel {
        self.controller.model()
    }

    pub async fn run_command(&mut self, command: EditorCommand) {
        match self.controller.dispatch(command).await {
            Ok(outcome) => {
                self.last_outcome = Some(outcome);
                self.last_error = None;
            }
            Err(error) => {
                self.last_outcome = None;
                self.last_error = Some(format!("{error:#}"));
            }
        }
    }

    pub fn forget_events(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Channel names of the recorded events, skipping hover and selection
    pub fn mutation_channels(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(ModelEvent::channel)
            .filter(|channel| {
                !matches!(
                    channel,
                    Channel::VariableHover | Channel::RegulationHover | Channel::Selection
                )
            })
            .map(|channel| channel.name().to_string())
            .collect()
    }
}

impl Default for EditorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `observable activation`-style descriptions used in feature files
pub fn parse_regulation_kind(observability: &str, monotonicity: &str) -> (bool, Monotonicity) {
    let observable = observability == "observable";
    let monotonicity = match monotonicity {
        "activation" => Monotonicity::Activation,
        "inhibition" => Monotonicity::Inhibition,
        _ => Monotonicity::Unknown,
    };
    (observable, monotonicity)
}

/// Parse `0>1,1>0` into regulation ids
pub fn parse_regulation_ids(text: &str) -> Vec<RegulationId> {
    text.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| pair.trim().split_once('>'))
        .map(|(source, target)| RegulationId::new(source.trim(), target.trim()))
        .collect()
}
