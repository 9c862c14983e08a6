//! Scene loading from scene text

use crate::report::{Diagnostic, LoadReport, Severity};
use crate::source::SceneSource;
use crate::token::{Position, Scope, TokenKind};
use crate::tokenizer::{SyntaxError, SyntaxErrorKind, Tokenizer};
use ember_core::EmberError;
use ember_ecs::{AttachPolicy, Behavior, BehaviorRegistry, Object, Scene};
use ember_schema::{coerce, unquote};
use thiserror::Error;

/// A fatal load error. Objects completed before the error stay in the scene.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Scene \"{scene}\" already loaded")]
    AlreadyLoaded { scene: String },

    #[error("{source}")]
    Unreadable { source: EmberError },

    #[error("{}", .0.kind)]
    Syntax(#[from] SyntaxError),

    #[error("Behavior name {text} must be wrapped in double quotes")]
    UnquotedBehaviorName { text: String, position: Position },

    #[error("Unable to find behavior \"{name}\"")]
    UnknownBehavior { name: String, position: Position },

    #[error("{source}")]
    Attach {
        source: EmberError,
        position: Position,
    },
}

impl LoadError {
    /// Where in the scene text the error was found
    pub fn position(&self) -> Option<Position> {
        match self {
            LoadError::AlreadyLoaded { .. } | LoadError::Unreadable { .. } => None,
            LoadError::Syntax(err) => Some(err.position),
            LoadError::UnquotedBehaviorName { position, .. }
            | LoadError::UnknownBehavior { position, .. }
            | LoadError::Attach { position, .. } => Some(*position),
        }
    }
}

/// Populates a scene from its text, resolving behaviors through a registry
pub struct SceneLoader<'a> {
    registry: &'a BehaviorRegistry,
    source: &'a dyn SceneSource,
}

impl<'a> SceneLoader<'a> {
    pub fn new(registry: &'a BehaviorRegistry, source: &'a dyn SceneSource) -> Self {
        Self { registry, source }
    }

    /// Load `scene`, which must be empty. Recoverable problems are returned
    /// in the report.
    pub fn try_load(&self, scene: &mut Scene) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::new(scene.name());
        self.run(scene, &mut report)?;
        Ok(report)
    }

    /// Load `scene`, logging a fatal error instead of returning it
    pub fn load(&self, scene: &mut Scene) -> bool {
        match self.try_load(scene) {
            Ok(_) => true,
            Err(err) => {
                log_fatal(scene.name(), &err);
                false
            }
        }
    }

    /// Load `scene` and fold a fatal error into the report as an error
    /// diagnostic
    pub fn check(&self, scene: &mut Scene) -> LoadReport {
        let mut report = LoadReport::new(scene.name());

        if let Err(err) = self.run(scene, &mut report) {
            log_fatal(scene.name(), &err);
            report.push(Diagnostic::new(
                Severity::Error,
                err.to_string(),
                err.position().unwrap_or(Position::START),
            ));
            report.object_count = scene.object_count();
        }

        report
    }

    fn run(&self, scene: &mut Scene, report: &mut LoadReport) -> Result<(), LoadError> {
        if !scene.is_empty() {
            return Err(LoadError::AlreadyLoaded {
                scene: scene.name().to_string(),
            });
        }

        let text = self
            .source
            .read(scene)
            .map_err(|source| LoadError::Unreadable { source })?;

        let mut tokenizer = Tokenizer::new(&text);
        let mut current: Option<Object> = None;

        loop {
            let token = tokenizer.next_token()?;
            match token.kind {
                TokenKind::ObjectOpen => current = Some(Object::new()),
                TokenKind::ObjectClose => {
                    if let Some(mut object) = current.take() {
                        if !object.has_name() {
                            object.set_name(format!("Default {}", scene.object_count() + 1));
                        }
                        scene.add(object);
                    }
                }
                TokenKind::Field { label, field } => {
                    let Some(object) = current.as_mut() else {
                        continue;
                    };

                    match label.as_str() {
                        "name" => match unquote(&field) {
                            Some(name) => object.set_name(name),
                            None => report.warn(
                                token.position,
                                "String fields must be wrapped in double quotes; skipping",
                            ),
                        },
                        "add_script" => self.load_behavior(
                            &mut tokenizer,
                            object,
                            &field,
                            token.position,
                            report,
                        )?,
                        other => report.warn(
                            token.position,
                            format!("Unknown object label \"{}\"; skipping", other),
                        ),
                    }
                }
                TokenKind::BehaviorClose => {}
                TokenKind::Eof => {
                    if scene.is_empty() {
                        report.warn(token.position, "No objects in scene file");
                    }
                    break;
                }
            }
        }

        report.object_count = scene.object_count();
        log::info!("Successfully loaded scene \"{}\"", scene.name());
        Ok(())
    }

    /// Resolve and attach the behavior named by an `add_script` field, then
    /// apply the fields of its block
    fn load_behavior(
        &self,
        tokenizer: &mut Tokenizer<'_>,
        object: &mut Object,
        raw_name: &str,
        position: Position,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        let name = unquote(raw_name).ok_or_else(|| LoadError::UnquotedBehaviorName {
            text: raw_name.to_string(),
            position,
        })?;

        let behavior = self
            .registry
            .create(name)
            .ok_or_else(|| LoadError::UnknownBehavior {
                name: name.to_string(),
                position,
            })?;

        // A second instance of a no-duplicates variant writes into the first
        let slot = object
            .attach(behavior, AttachPolicy::MergeIntoExisting)
            .map_err(|source| LoadError::Attach { source, position })?;

        tokenizer.expect_behavior_block()?;

        loop {
            let token = tokenizer.next_token()?;
            match token.kind {
                TokenKind::BehaviorClose => return Ok(()),
                TokenKind::Field { label, field } => {
                    if let Some(behavior) = object.behavior_mut(slot) {
                        apply_field(behavior, &label, &field, token.position, report);
                    }
                }
                TokenKind::Eof => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnexpectedEof {
                            scope: Scope::Behavior,
                        },
                        token.position,
                    )
                    .into());
                }
                TokenKind::ObjectOpen | TokenKind::ObjectClose => {}
            }
        }
    }
}

/// Coerce `field` to the declared kind of `label` and store it. Failures
/// are warnings and leave the field unchanged.
fn apply_field(
    behavior: &mut dyn Behavior,
    label: &str,
    field: &str,
    position: Position,
    report: &mut LoadReport,
) {
    let Some(decl) = behavior.field_decl(label) else {
        report.warn(
            position,
            format!(
                "Unable to find field \"{}\" in behavior \"{}\"; skipping",
                label,
                behavior.type_name()
            ),
        );
        return;
    };

    let result = coerce(decl.kind, field)
        .map_err(|err| err.to_string())
        .and_then(|value| behavior.set_field(label, value).map_err(|err| err.to_string()));

    if let Err(message) = result {
        report.warn(
            position,
            format!("Field \"{}\": {}; skipping", label, message),
        );
    }
}

fn log_fatal(scene: &str, err: &LoadError) {
    match err.position() {
        Some(position) => log::error!(
            "Error while reading scene file \"{}.txt\": {}; failed to load scene [{}]",
            scene,
            err,
            position
        ),
        None => log::error!(
            "Error while reading scene file \"{}.txt\": {}; failed to load scene",
            scene,
            err
        ),
    }
}
