//! 目标服务判定

use infrastructure_common::TypeDescriptor;

/// 类型是否适用于当前服务
///
/// 没有目标服务标记的类型适用于所有服务；否则当前服务名称需要
/// 与标记中的某一项相等（不区分大小写）。
pub fn is_targeted(descriptor: &TypeDescriptor, current_service_name: &str) -> bool {
    match &descriptor.targeting {
        None => true,
        Some(marker) => marker
            .targets
            .iter()
            .any(|target| eq_ignore_case(target, current_service_name)),
    }
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
