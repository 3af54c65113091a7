use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CensRSError, Result};

/// 列の意味型
///
/// ミクロデータの列は数値・カテゴリ・識別子のいずれかとして宣言します。
/// 型はロード時に一度だけ検証され、以降の操作はこのスキーマに対して
/// 型チェックされます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticType {
    /// 数値列（f64）
    Numeric,
    /// カテゴリ列（整数コード）
    Categorical,
    /// 識別子列（文字列、集計対象外）
    Identifier,
}

impl SemanticType {
    /// 型名を文字列で取得
    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::Numeric => "numeric",
            SemanticType::Categorical => "categorical",
            SemanticType::Identifier => "identifier",
        }
    }

    /// 文字列から意味型を解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "numeric" | "num" | "n" => Some(SemanticType::Numeric),
            "categorical" | "cat" | "c" => Some(SemanticType::Categorical),
            "identifier" | "id" | "i" => Some(SemanticType::Identifier),
            _ => None,
        }
    }
}

/// 列定義: 列名、意味型、null許容フラグの組
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// 列名
    pub name: String,
    /// 意味型
    pub dtype: SemanticType,
    /// 欠損値を許容するかどうか
    pub nullable: bool,
}

impl Field {
    /// 新しい列定義を作成（欠損許容）
    pub fn new(name: impl Into<String>, dtype: SemanticType) -> Self {
        Field {
            name: name.into(),
            dtype,
            nullable: true,
        }
    }

    /// null許容フラグを設定
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// スキーマ: 列定義の順序付きリスト
///
/// 構築時に列名の一意性を検証し、列名から位置への
/// マッピングを保持する
#[derive(Debug, Clone)]
pub struct Schema {
    /// 列定義
    fields: Vec<Field>,

    /// 列名から位置へのマッピング
    map: HashMap<String, usize>,
}

impl Schema {
    /// 新しいスキーマを作成
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut map = HashMap::with_capacity(fields.len());

        // 一意性チェックしながらマップ構築
        for (i, field) in fields.iter().enumerate() {
            if map.insert(field.name.clone(), i).is_some() {
                return Err(CensRSError::DuplicateColumnName(field.name.clone()));
            }
        }

        Ok(Schema { fields, map })
    }

    /// 列数を取得
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// スキーマが空かどうか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 列定義の一覧を取得
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// 列名の一覧を取得
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// 列名から位置を取得
    pub fn position(&self, name: &str) -> Option<usize> {
        self.map.get(name).copied()
    }

    /// 列名から列定義を取得
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.position(name).map(|i| &self.fields[i])
    }

    /// 位置から列定義を取得
    pub fn field_at(&self, pos: usize) -> Option<&Field> {
        self.fields.get(pos)
    }

    /// 列名が存在するかどうか
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// 列定義を取得（存在しなければエラー）
    pub fn require(&self, name: &str) -> Result<&Field> {
        self.field(name)
            .ok_or_else(|| CensRSError::ColumnNotFound(name.to_string()))
    }

    /// 指定した意味型の列位置を取得（型が合わなければエラー）
    pub fn require_type(&self, name: &str, dtype: SemanticType) -> Result<usize> {
        let pos = self
            .position(name)
            .ok_or_else(|| CensRSError::ColumnNotFound(name.to_string()))?;
        let field = &self.fields[pos];
        if field.dtype != dtype {
            return Err(CensRSError::ColumnTypeMismatch {
                name: name.to_string(),
                expected: dtype,
                found: field.dtype,
            });
        }
        Ok(pos)
    }
}
