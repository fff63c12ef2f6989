use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tasks::{
    DeliveryDetailsTask, FinalPaymentTask, OrderTasks, RegistrationTask, SchedulingTask,
    TaskState,
};
use crate::CoreError;

/// A task payload the model does not know how to interpret.
///
/// Kept only so it can be shown verbatim; nothing compares or inspects it
/// beyond the shared task fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTask(Value);

impl RawTask {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Shared task fields, or defaults when the payload does not carry them.
    pub fn state(&self) -> TaskState {
        TaskState::deserialize(&self.0).unwrap_or_default()
    }

    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownTask<'a> {
    Scheduling(&'a SchedulingTask),
    Registration(&'a RegistrationTask),
    FinalPayment(&'a FinalPaymentTask),
    DeliveryDetails(&'a DeliveryDetailsTask),
}

impl<'a> KnownTask<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            KnownTask::Scheduling(_) => "scheduling",
            KnownTask::Registration(_) => "registration",
            KnownTask::FinalPayment(_) => "finalPayment",
            KnownTask::DeliveryDetails(_) => "deliveryDetails",
        }
    }

    pub fn state(&self) -> &'a TaskState {
        match *self {
            KnownTask::Scheduling(t) => &t.state,
            KnownTask::Registration(t) => &t.state,
            KnownTask::FinalPayment(t) => &t.state,
            KnownTask::DeliveryDetails(t) => &t.state,
        }
    }
}

/// One entry of the tasks view: either a modelled task or an opaque payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskEntry<'a> {
    Known(KnownTask<'a>),
    Raw { name: &'a str, task: &'a RawTask },
}

impl TaskEntry<'_> {
    pub fn name(&self) -> &str {
        match self {
            TaskEntry::Known(known) => known.name(),
            TaskEntry::Raw { name, .. } => name,
        }
    }

    pub fn state(&self) -> TaskState {
        match self {
            TaskEntry::Known(known) => known.state().clone(),
            TaskEntry::Raw { task, .. } => task.state(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    #[serde(default)]
    pub tasks: OrderTasks,
    /// Display-only passthrough, not persisted with history.
    #[serde(skip)]
    pub raw_tasks: BTreeMap<String, RawTask>,
}

impl OrderDetails {
    /// Best-effort decode of a tasks endpoint body.
    ///
    /// The body either wraps the task map in `tasks` or is the task map
    /// itself. A known task that fails to decode is kept as a raw task. A
    /// `null` payload means the task is absent.
    pub fn from_value(body: Value) -> Self {
        let tasks = match body {
            Value::Object(mut top) => match top.remove("tasks") {
                Some(Value::Object(tasks)) => tasks,
                Some(_) => Map::new(),
                None => top,
            },
            _ => Map::new(),
        };

        let mut details = OrderDetails::default();
        for (name, payload) in tasks {
            if payload.is_null() {
                continue;
            }
            let modelled = match name.as_str() {
                "scheduling" => decode_into(&payload, &mut details.tasks.scheduling),
                "registration" => decode_into(&payload, &mut details.tasks.registration),
                "finalPayment" => decode_into(&payload, &mut details.tasks.final_payment),
                "deliveryDetails" => decode_into(&payload, &mut details.tasks.delivery_details),
                _ => false,
            };
            if !modelled {
                details.raw_tasks.insert(name, RawTask::new(payload));
            }
        }
        details
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(CoreError::InvalidPayload(
                "tasks body is not a JSON object".to_string(),
            ));
        }
        Ok(Self::from_value(value))
    }

    /// Modelled and raw tasks together, ordered by their `order` field.
    pub fn task_entries(&self) -> Vec<TaskEntry<'_>> {
        let tasks = &self.tasks;
        let mut entries: Vec<TaskEntry<'_>> = [
            tasks.scheduling.as_ref().map(KnownTask::Scheduling),
            tasks.registration.as_ref().map(KnownTask::Registration),
            tasks.final_payment.as_ref().map(KnownTask::FinalPayment),
            tasks.delivery_details.as_ref().map(KnownTask::DeliveryDetails),
        ]
        .into_iter()
        .flatten()
        .map(TaskEntry::Known)
        .chain(
            self.raw_tasks
                .iter()
                .map(|(name, task)| TaskEntry::Raw {
                    name: name.as_str(),
                    task,
                }),
        )
        .collect();

        entries.sort_by(|a, b| {
            a.state()
                .order
                .cmp(&b.state().order)
                .then_with(|| a.name().cmp(b.name()))
        });
        entries
    }
}

fn decode_into<T: DeserializeOwned>(payload: &Value, slot: &mut Option<T>) -> bool {
    match T::deserialize(payload) {
        Ok(task) => {
            *slot = Some(task);
            true
        }
        Err(_) => false,
    }
}
