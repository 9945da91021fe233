use crate::error::MinigradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// An ordered chain of layers; `forward` threads the input through each in turn.
///
/// Layers added without a name are named by their position ("0", "1", ...).
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<(String, Box<dyn Module>)>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends `module` under `name`.
    pub fn add_module(&mut self, name: &str, module: Box<dyn Module>) {
        self.modules.push((name.to_string(), module));
    }

    /// Appends `module` named by its position.
    pub fn push(&mut self, module: Box<dyn Module>) {
        let name = self.modules.len().to_string();
        self.modules.push((name, module));
    }

    /// Builder form of [`Sequential::push`].
    pub fn with<M: Module + 'static>(mut self, module: M) -> Self {
        self.push(Box::new(module));
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules_list(&self) -> impl Iterator<Item = (&str, &dyn Module)> {
        self.modules.iter().map(|(name, m)| (name.as_str(), m.as_ref()))
    }
}

impl Module for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor, MinigradError> {
        let mut current_input = input.clone();
        for (_, module) in &self.modules {
            current_input = module.forward(&current_input)?;
        }
        Ok(current_input)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.modules
            .iter()
            .flat_map(|(_, module)| module.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = Vec::new();
        for (name, module) in &self.modules {
            for (param_name, param) in module.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
