use crate::config::Config;
use crate::distance::City;
use crate::interfaces::{calculate_route, Interface, Message, RouteRequest};
use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::{prelude::*, JsError};

fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// 通过浏览器来使用 libtsp 的入口，实现了界面特征
#[wasm_bindgen]
pub struct Web {
    callback: Function,
    config: Config,
}

/// 用于在浏览器中验证输入的配置是否正确
#[wasm_bindgen]
pub fn validate(js_config: JsValue) -> Result<JsValue, JsError> {
    set_panic_hook();
    let config: Config = from_value(js_config)?;
    let serializer = Serializer::json_compatible();
    Ok(config.serialize(&serializer)?)
}

#[wasm_bindgen]
impl Web {
    pub fn new(callback: Function) -> Web {
        set_panic_hook();
        Self {
            callback,
            config: Config::default(),
        }
    }

    pub fn sync(&mut self, config: JsValue) -> Result<(), JsError> {
        self.config = from_value(config)?;
        Ok(())
    }

    /// 对同一组城市运行两种求解方法，返回以算法名称为键的合并结果
    pub fn solve(&self, cities: JsValue, starting_point: Option<String>) -> Result<JsValue, JsError> {
        let cities: Vec<City> = from_value(cities)?;
        let request = RouteRequest {
            cities,
            starting_point,
        };
        let comparison = calculate_route(request, &self.config, self)?;
        let serializer = Serializer::json_compatible();
        Ok(comparison.serialize(&serializer)?)
    }
}

impl Interface for Web {
    fn post(&self, message: Message) {
        let serializer = Serializer::json_compatible();
        if let Ok(value) = message.serialize(&serializer) {
            // 回调抛出的异常不影响求解
            let _ = self.callback.call1(&JsValue::null(), &value);
        }
    }
}
