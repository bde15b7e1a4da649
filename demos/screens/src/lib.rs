use kickback_model::TreeNode;

include!(concat!(env!("OUT_DIR"), "/screens.rs"));
include!(concat!(env!("OUT_DIR"), "/registry.rs"));
