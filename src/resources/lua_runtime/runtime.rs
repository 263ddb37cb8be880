//! Lua runtime core implementation.
//!
//! This module contains the `LuaRuntime` struct which manages the Lua interpreter
//! and provides the `engine` table API to Lua scripts.

use super::commands::*;
use super::drawtable::parse_drawable;
use crate::controllers::ControllerKind;
use crate::drawable::Drawable;
use mlua::prelude::*;
use std::cell::{Cell, RefCell};

use log::{error, info, warn};

/// Named registry slot holding the `input name → function` handler table.
const CONTROLLER_HANDLERS: &str = "controller_handlers";

/// Shared state accessible from Lua function closures.
/// This is stored in Lua's app_data and allows Lua functions to queue commands.
pub(super) struct LuaAppData {
    controller_commands: RefCell<Vec<ControllerCmd>>,
    window_commands: RefCell<Vec<WindowCmd>>,
    draw_commands: RefCell<Vec<Drawable>>,
    /// Registered controller names (read-only snapshot for Lua).
    controller_names: RefCell<Vec<String>>,
    /// Window size in pixels (read-only snapshot for Lua).
    window_size: Cell<(i32, i32)>,
}

/// Resource holding the Lua interpreter state.
///
/// This is a `NonSend` resource because the Lua state is not thread-safe.
/// It should be initialized once at startup and reused throughout the game.
pub struct LuaRuntime {
    lua: Lua,
}

/// Registers a Lua function that pushes a command to a queue in `LuaAppData`.
macro_rules! register_cmd {
    ($engine:expr, $lua:expr, $name:expr, $queue:ident,
     |$args:pat_param| $arg_ty:ty, $cmd:expr) => {
        $engine.set(
            $name,
            $lua.create_function(|lua, $args: $arg_ty| {
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .$queue
                    .borrow_mut()
                    .push($cmd);
                Ok(())
            })?,
        )?;
    };
}

impl LuaRuntime {
    /// Creates a new Lua runtime and registers the `engine` API.
    ///
    /// # Errors
    ///
    /// Returns an error if Lua initialization or API registration fails.
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();

        // Set up the package path so `require` can find scripts in assets/scripts/
        lua.load(r#"package.path = "./assets/scripts/?.lua;./assets/scripts/?/init.lua;" .. package.path"#)
            .exec()?;

        lua.set_app_data(LuaAppData {
            controller_commands: RefCell::new(Vec::new()),
            window_commands: RefCell::new(Vec::new()),
            draw_commands: RefCell::new(Vec::new()),
            controller_names: RefCell::new(Vec::new()),
            window_size: Cell::new((0, 0)),
        });
        lua.set_named_registry_value(CONTROLLER_HANDLERS, lua.create_table()?)?;

        let runtime = Self { lua };
        runtime.register_base_api()?;
        runtime.register_controller_api()?;
        runtime.register_window_api()?;
        runtime.register_draw_api()?;

        Ok(runtime)
    }

    fn register_base_api(&self) -> LuaResult<()> {
        let engine = self.lua.create_table()?;

        // engine.log(message) - General purpose logging
        engine.set(
            "log",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        // engine.log_info(message) - Info level logging
        engine.set(
            "log_info",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        // engine.log_warn(message) - Warning level logging
        engine.set(
            "log_warn",
            self.lua.create_function(|_, msg: String| {
                warn!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        // engine.log_error(message) - Error level logging
        engine.set(
            "log_error",
            self.lua.create_function(|_, msg: String| {
                error!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        self.lua.globals().set("engine", engine)?;

        Ok(())
    }

    fn register_controller_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;

        // engine.create_controller(name, kind, map) -> name or nil
        // The kind is checked now; the controller is registered when commands are applied.
        engine.set(
            "create_controller",
            self.lua
                .create_function(|lua, (name, kind, map): (String, String, LuaTable)| {
                    let Ok(kind) = kind.parse::<ControllerKind>() else {
                        warn!(target: "lua", "create_controller: unknown controller kind '{}'", kind);
                        return Ok(None);
                    };
                    let mut controls = Vec::new();
                    for pair in map.pairs::<String, String>() {
                        controls.push(pair?);
                    }
                    lua.app_data_ref::<LuaAppData>()
                        .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                        .controller_commands
                        .borrow_mut()
                        .push(ControllerCmd::Create {
                            name: name.clone(),
                            kind,
                            controls,
                        });
                    Ok(Some(name))
                })?,
        )?;

        // engine.take_controller(entity_id, name) - queued; the outcome is only logged
        register_cmd!(engine, self.lua, "take_controller", controller_commands,
            |(entity_id, name)| (u64, String), ControllerCmd::Take { entity_id, name });

        // engine.controllers() -> array of registered names (from cached snapshot)
        engine.set(
            "controllers",
            self.lua.create_function(|lua, ()| {
                let names = lua
                    .app_data_ref::<LuaAppData>()
                    .map(|data| data.controller_names.borrow().clone())
                    .unwrap_or_default();
                lua.create_sequence_from(names)
            })?,
        )?;

        // engine.set_controller_callback(input, fn) - replaces any previous handler
        engine.set(
            "set_controller_callback",
            self.lua
                .create_function(|lua, (input, handler): (String, LuaFunction)| {
                    let handlers: LuaTable = lua.named_registry_value(CONTROLLER_HANDLERS)?;
                    handlers.set(input, handler)
                })?,
        )?;

        Ok(())
    }

    fn register_window_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;

        register_cmd!(engine, self.lua, "close_window", window_commands,
            |()| (), WindowCmd::Close);
        register_cmd!(engine, self.lua, "set_window_size", window_commands,
            |(width, height)| (i32, i32), WindowCmd::SetSize { width, height });

        // engine.window_size() -> { w = width, h = height } (from cached snapshot)
        engine.set(
            "window_size",
            self.lua.create_function(|lua, ()| {
                let (w, h) = lua
                    .app_data_ref::<LuaAppData>()
                    .map(|data| data.window_size.get())
                    .unwrap_or_default();
                let size = lua.create_table()?;
                size.set("w", w)?;
                size.set("h", h)?;
                Ok(size)
            })?,
        )?;

        Ok(())
    }

    fn register_draw_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;

        // engine.draw(table) -> table or nil
        engine.set(
            "draw",
            self.lua.create_function(|lua, table: LuaTable| {
                let Some(drawable) = parse_drawable(&table)? else {
                    return Ok(None);
                };
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .draw_commands
                    .borrow_mut()
                    .push(drawable);
                Ok(Some(table))
            })?,
        )?;

        Ok(())
    }

    /// Drains all queued controller commands.
    pub fn drain_controller_commands(&self) -> Vec<ControllerCmd> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| data.controller_commands.borrow_mut().drain(..).collect())
            .unwrap_or_default()
    }

    /// Drains all queued window commands.
    pub fn drain_window_commands(&self) -> Vec<WindowCmd> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| data.window_commands.borrow_mut().drain(..).collect())
            .unwrap_or_default()
    }

    /// Drains all drawables queued by `engine.draw`, oldest first.
    pub fn drain_draw_commands(&self) -> Vec<Drawable> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| data.draw_commands.borrow_mut().drain(..).collect())
            .unwrap_or_default()
    }

    /// Updates the controller names `engine.controllers()` returns.
    pub fn update_controller_names_cache(&self, names: Vec<String>) {
        if let Some(data) = self.lua.app_data_ref::<LuaAppData>() {
            *data.controller_names.borrow_mut() = names;
        }
    }

    /// Updates the size `engine.window_size()` returns.
    pub fn update_window_size_cache(&self, width: i32, height: i32) {
        if let Some(data) = self.lua.app_data_ref::<LuaAppData>() {
            data.window_size.set((width, height));
        }
    }

    /// Whether a script installed a handler for the logical input `input`.
    pub fn has_controller_callback(&self, input: &str) -> bool {
        self.lua
            .named_registry_value::<LuaTable>(CONTROLLER_HANDLERS)
            .and_then(|handlers| handlers.contains_key(input))
            .unwrap_or(false)
    }

    /// Calls the handler for `input` with `(entity_id, dt)`.
    ///
    /// Returns `Ok(false)` if no handler is installed for `input`.
    pub fn call_controller_callback(&self, input: &str, entity_id: u64, dt: f32) -> LuaResult<bool> {
        let handlers: LuaTable = self.lua.named_registry_value(CONTROLLER_HANDLERS)?;
        let Some(handler) = handlers.get::<Option<LuaFunction>>(input)? else {
            return Ok(false);
        };
        handler.call::<()>((entity_id, dt))?;
        Ok(true)
    }

    /// Loads and executes a Lua script from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the script has syntax/runtime errors.
    pub fn run_script(&self, path: &str) -> LuaResult<()> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| LuaError::ExternalError(std::sync::Arc::new(e)))?;
        self.lua.load(&script).set_name(path).exec()
    }

    /// Executes a chunk of Lua source.
    pub fn run_source(&self, name: &str, source: &str) -> LuaResult<()> {
        self.lua.load(source).set_name(name).exec()
    }

    /// Calls a global Lua function by name with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the function doesn't exist or execution fails.
    pub fn call_function<A, R>(&self, name: &str, args: A) -> LuaResult<R>
    where
        A: IntoLuaMulti,
        R: FromLuaMulti,
    {
        let func: LuaFunction = self.lua.globals().get(name)?;
        func.call(args)
    }

    /// Checks if a global function exists.
    pub fn has_function(&self, name: &str) -> bool {
        self.lua.globals().get::<LuaFunction>(name).is_ok()
    }

    /// Returns a reference to the underlying Lua state.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_controller_queues_command() {
        let runtime = LuaRuntime::new().expect("lua");
        let name: Option<String> = runtime
            .lua()
            .load(r#"return engine.create_controller("wasd", "keyboard", { w = "up" })"#)
            .eval()
            .expect("call");
        assert_eq!(name.as_deref(), Some("wasd"));
        assert_eq!(
            runtime.drain_controller_commands(),
            vec![ControllerCmd::Create {
                name: "wasd".to_string(),
                kind: ControllerKind::Keyboard,
                controls: vec![("w".to_string(), "up".to_string())],
            }]
        );
        assert!(runtime.drain_controller_commands().is_empty());
    }

    #[test]
    fn test_create_controller_unknown_kind_returns_nil() {
        let runtime = LuaRuntime::new().expect("lua");
        let name: Option<String> = runtime
            .lua()
            .load(r#"return engine.create_controller("pad", "gamepad", {})"#)
            .eval()
            .expect("call");
        assert!(name.is_none());
        assert!(runtime.drain_controller_commands().is_empty());
    }

    #[test]
    fn test_controllers_reads_snapshot() {
        let runtime = LuaRuntime::new().expect("lua");
        runtime.update_controller_names_cache(vec!["arrows".into(), "wasd".into()]);
        let names: Vec<String> = runtime
            .lua()
            .load("return engine.controllers()")
            .eval()
            .expect("call");
        assert_eq!(names, vec!["arrows".to_string(), "wasd".to_string()]);
    }

    #[test]
    fn test_window_size_reads_snapshot() {
        let runtime = LuaRuntime::new().expect("lua");
        runtime.update_window_size_cache(640, 480);
        let (w, h): (i32, i32) = runtime
            .lua()
            .load("local s = engine.window_size() return s.w, s.h")
            .eval()
            .expect("call");
        assert_eq!((w, h), (640, 480));
    }

    #[test]
    fn test_window_commands_queue_in_order() {
        let runtime = LuaRuntime::new().expect("lua");
        runtime
            .run_source("test", "engine.set_window_size(320, 200) engine.close_window()")
            .expect("script");
        assert_eq!(
            runtime.drain_window_commands(),
            vec![
                WindowCmd::SetSize {
                    width: 320,
                    height: 200
                },
                WindowCmd::Close
            ]
        );
    }

    #[test]
    fn test_draw_returns_table_or_nil() {
        let runtime = LuaRuntime::new().expect("lua");
        let (accepted, rejected): (bool, bool) = runtime
            .lua()
            .load(
                r#"local t = { shape = "circle" }
                   return engine.draw(t) == t, engine.draw({ shape = "star" }) == nil"#,
            )
            .eval()
            .expect("call");
        assert!(accepted);
        assert!(rejected);
        assert_eq!(runtime.drain_draw_commands().len(), 1);
    }

    #[test]
    fn test_set_controller_callback_replaces_handler() {
        let runtime = LuaRuntime::new().expect("lua");
        runtime
            .run_source(
                "test",
                r#"calls = {}
                   engine.set_controller_callback("up", function(id, dt) calls[#calls + 1] = "first" end)
                   engine.set_controller_callback("up", function(id, dt) calls[#calls + 1] = "second:" .. id end)"#,
            )
            .expect("script");

        assert!(runtime.has_controller_callback("up"));
        assert!(!runtime.has_controller_callback("down"));
        assert!(runtime.call_controller_callback("up", 7, 0.016).expect("call"));
        assert!(!runtime.call_controller_callback("down", 7, 0.016).expect("call"));

        let calls: Vec<String> = runtime.lua().globals().get("calls").expect("calls");
        assert_eq!(calls, vec!["second:7".to_string()]);
    }
}
