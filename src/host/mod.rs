pub mod hyper_binding;
