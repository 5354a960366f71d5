//! 客户端请求必填项校验

use super::types::{ClientQuoteRequest, Volume};

/// 校验报价请求，返回缺失项描述
///
/// 空列表表示请求合法。整体缺失项（邮编、货物列表）先于逐件检查输出，
/// 逐件检查按下标升序、字段顺序固定。
pub fn validate(req: &ClientQuoteRequest) -> Vec<String> {
    let mut defects = Vec::new();

    if req.zipcode().trim().is_empty() {
        defects.push("Zipcode is required".to_string());
    }

    if req.volumes.is_empty() {
        defects.push("Volumes are required".to_string());
    }

    for (index, volume) in req.volumes.iter().enumerate() {
        for field in missing_fields(volume) {
            defects.push(format!("{} is required for Volume[{}]", field, index));
        }
    }

    defects
}

fn missing_fields(volume: &Volume) -> Vec<&'static str> {
    let checks = [
        ("Category", volume.category.trim().is_empty()),
        ("Amount", volume.amount == 0),
        ("Price", volume.price == 0.0),
        ("SKU", volume.sku.trim().is_empty()),
        ("Height", volume.height == 0.0),
        ("Width", volume.width == 0.0),
        ("Length", volume.length == 0.0),
    ];

    checks
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
}
